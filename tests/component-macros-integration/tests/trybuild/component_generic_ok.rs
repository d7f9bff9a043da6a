use pip_services_commons::{ApplicationResult, Component, ConfigParams, Configurable};
use std::marker::PhantomData;

#[derive(Component)]
#[component(configurable)]
struct Holder<T: Send + Sync + 'static> {
    _marker: PhantomData<T>,
}

impl<T: Send + Sync + 'static> Configurable for Holder<T> {
    fn configure(&self, _config: &ConfigParams) -> ApplicationResult<()> {
        Ok(())
    }
}

fn main() {
    let holder = Holder::<u32> { _marker: PhantomData };
    assert!(holder.as_configurable().is_some());
}
