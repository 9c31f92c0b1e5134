use std::sync::LazyLock;

use apigen_core::ir::ApiInfo;
use minijinja::{Environment, context};

use crate::declarations::Declarations;

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template(
        "interface.ts.j2",
        include_str!("../templates/interface.ts.j2"),
    )
    .expect("template should be valid");
    env.add_template("enum.ts.j2", include_str!("../templates/enum.ts.j2"))
        .expect("template should be valid");
    env.add_template("client.ts.j2", include_str!("../templates/client.ts.j2"))
        .expect("template should be valid");
    env.add_template("module.ts.j2", include_str!("../templates/module.ts.j2"))
        .expect("template should be valid");
    env
});

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
pub(crate) fn escape_jsdoc(value: &str) -> String {
    value.replace("*/", "*\\/")
}

pub(crate) fn render_interface(name: &str, fields: &[minijinja::Value]) -> String {
    let template = ENV.get_template("interface.ts.j2").unwrap();
    template
        .render(context! { name, fields })
        .expect("render should succeed")
        .trim_end()
        .to_string()
}

pub(crate) fn render_enum(name: &str, members: &[minijinja::Value]) -> String {
    let template = ENV.get_template("enum.ts.j2").unwrap();
    template
        .render(context! { name, members })
        .expect("render should succeed")
        .trim_end()
        .to_string()
}

pub(crate) fn render_client(
    name: &str,
    base_url_literal: &str,
    methods: &[minijinja::Value],
) -> String {
    let template = ENV.get_template("client.ts.j2").unwrap();
    template
        .render(context! { name, base_url_literal, methods })
        .expect("render should succeed")
        .trim_end()
        .to_string()
}

/// Render the complete output module: banner, runtime boilerplate, then
/// every declaration in emission order separated by blank lines.
pub fn render_module(info: &ApiInfo, declarations: &Declarations) -> String {
    let texts: Vec<&str> = declarations
        .in_emission_order()
        .map(|declaration| declaration.source_text.as_str())
        .collect();
    let template = ENV.get_template("module.ts.j2").unwrap();
    let rendered = template
        .render(context! {
            title => escape_jsdoc(&info.title),
            version => escape_jsdoc(&info.version),
            generator_version => env!("CARGO_PKG_VERSION"),
            declarations => texts,
        })
        .expect("render should succeed");
    format!("{}\n", rendered.trim_end())
}
