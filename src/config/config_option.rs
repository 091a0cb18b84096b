/// A configuration option, with a name and permitted range.
///
/// Options are set directly, e.g. `config.var_decay.value = 0.8`, with the bounds available for
/// external validation (notably by the command-line interface).
#[derive(Clone, Copy)]
pub struct ConfigOption<T> {
    /// The name of the option, as given on a command line.
    pub name: &'static str,

    /// The minimum permitted value.
    pub min: T,

    /// The maximum permitted value.
    pub max: T,

    /// The value of the option.
    pub value: T,
}

impl<T: Copy> ConfigOption<T> {
    /// The minimum and maximum permitted values, paired.
    pub fn min_max(&self) -> (T, T) {
        (self.min, self.max)
    }
}
