use pip_services_commons::{ApplicationResult, Component, ConfigParams, Configurable};

#[derive(Component)]
#[component(configurable)]
struct OkService;

impl Configurable for OkService {
    fn configure(&self, _config: &ConfigParams) -> ApplicationResult<()> {
        Ok(())
    }
}

#[derive(Component)]
struct PlainService;

fn main() {
    // 生成的访问器只暴露列出的能力
    let service = OkService;
    assert!(service.as_configurable().is_some());
    assert!(service.as_openable().is_none());
    assert!(PlainService.as_configurable().is_none());
}
