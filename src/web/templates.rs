//! Template environment for the server-rendered pages.
//!
//! The four templates are embedded at compile time and parsed once when the
//! application is built, so a template error surfaces as an initialization
//! failure rather than a per-request one.

use minijinja::Environment;

/// Parsed template environment shared by all views.
#[derive(Debug)]
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Parses the embedded templates into a fresh environment.
    ///
    /// # Errors
    ///
    /// Returns the `minijinja` error when a template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../../templates/base.html"))?;
        env.add_template(
            "task_list.html",
            include_str!("../../templates/task_list.html"),
        )?;
        env.add_template(
            "task_form.html",
            include_str!("../../templates/task_form.html"),
        )?;
        env.add_template(
            "confirm_delete.html",
            include_str!("../../templates/confirm_delete.html"),
        )?;
        Ok(Self { env })
    }

    /// Renders the named template with the given context.
    ///
    /// # Errors
    ///
    /// Returns the `minijinja` error when the template is unknown or
    /// rendering fails.
    pub fn render(
        &self,
        name: &str,
        context: minijinja::Value,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}
