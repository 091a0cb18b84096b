/*!
The luby sequence, scaled to an arbitrary base.

See <https://oeis.org/A182105> for details on the luby sequence.

Restart `x` is given the budget `restart_first · luby(restart_inc, x)`, where `luby(y, x)` is
`y` raised to the exponent of the `x`th element of the sequence --- so with `y = 2` the familiar
1, 1, 2, 1, 1, 2, 4, … sequence is produced.

The implementation locates the finite subsequence containing index `x` and reduces `x` within
ever smaller subsequences until the exponent is fixed.
*/

/// The `x`th element of the luby sequence with base `y`.
pub fn luby(y: f64, mut x: u32) -> f64 {
    // Find the finite subsequence that contains index x, and the size of that subsequence.
    let mut size: u64 = 1;
    let mut seq: i32 = 0;
    while size < x as u64 + 1 {
        seq += 1;
        size = 2 * size + 1;
    }

    while size - 1 != x as u64 {
        size = (size - 1) >> 1;
        seq -= 1;
        x %= size as u32;
    }

    y.powi(seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://oeis.org/A182105
    const LUBY_SLICE: &[u32] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4,
        8, 16, 32, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1,
        2, 4, 8, 16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
    ];

    #[test]
    fn base_two() {
        for (x, known_value) in LUBY_SLICE.iter().enumerate() {
            assert_eq!(luby(2.0, x as u32), *known_value as f64);
        }
    }

    #[test]
    fn base_three() {
        // The exponents, not the values, follow the sequence.
        assert_eq!(luby(3.0, 0), 1.0);
        assert_eq!(luby(3.0, 2), 3.0);
        assert_eq!(luby(3.0, 6), 9.0);
        assert_eq!(luby(3.0, 14), 27.0);
    }
}
