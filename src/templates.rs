//! Page rendering with embedded minijinja templates.

use crate::error::AppError;
use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("add_item.html", include_str!("../templates/add_item.html")),
    ("edit_item.html", include_str!("../templates/edit_item.html")),
];

/// Compiled page templates. `.html` names get HTML autoescaping.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compiles every embedded template; fails on the first syntax error.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Templates { env })
    }

    pub fn render<T: Serialize>(&self, name: &str, ctx: &T) -> Result<String, AppError> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(ctx)?)
    }
}
