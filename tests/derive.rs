mod common;

use common::RecordingSender;
use quartz_interceptor::{
    Command, CommandTree, ConfigStore, Dispatcher, FromArgument, InterceptorConfig, Param,
    Registry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromArgument)]
enum Material {
    Stone,
    DiamondSword,
}

#[test]
fn variants_match_kebab_case_names() {
    assert_eq!(Material::from_arg("stone"), Ok(Material::Stone));
    assert_eq!(Material::from_arg("diamond-sword"), Ok(Material::DiamondSword));
    assert_eq!(
        Material::from_arg("DiamondSword"),
        Err("\"DiamondSword\" is not a valid material".to_owned())
    );
}

#[test]
fn derived_types_work_as_parameters() {
    let tree = CommandTree::new().command(
        Command::new("give")
            .param(Param::required::<Material>("item"))
            .returns(|ctx| {
                let item = ctx.args.require::<Material>("item")?;
                Ok(format!("{:?}", item))
            }),
    );
    let mut config = InterceptorConfig::default();
    config.messages.parameter_error = "bad %s".to_owned();
    let dispatcher = Dispatcher::new(tree, Registry::new(), &ConfigStore::new(config));
    let sender = RecordingSender::new("Steve");

    assert!(dispatcher.dispatch(sender.as_ref(), "give diamond-sword"));
    assert!(dispatcher.dispatch(sender.as_ref(), "give dirt"));
    assert_eq!(sender.messages(), vec!["DiamondSword", "bad item"]);
}
