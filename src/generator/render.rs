use crate::bound::ArityBound;
use crate::error::TemplateError;
use crate::generator::params::ParameterDictionary;
use crate::parser::template::Template;

/// Renders the message macro template once per arity, lowest arity first.
///
/// Unknown placeholders are rejected before anything is rendered.
pub fn render_message_macros(template: &str, bound: ArityBound) -> Result<String, TemplateError> {
    let template = Template::new(template)?;
    template.check(&ParameterDictionary::default())?;

    let mut out = String::new();
    for arity in bound.arities() {
        let params = ParameterDictionary::build(arity);
        out.push_str(&template.fill(&params)?);
        tracing::debug!(arity, "rendered message macros");
    }

    Ok(out)
}
