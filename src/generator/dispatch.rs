use serde::{Deserialize, Serialize};

use crate::bound::ArityBound;
use crate::error::TemplateError;
use crate::parser::directive::Directive;

/// Marker placed between the candidate macros of a dispatch list. A caller passing more
/// arguments than the highest arity lands on it instead of on a real macro.
pub const ARG_ERROR_SENTINEL: &str = "_ARG_ERROR_SENTINEL";

/// Macro of the consuming library that re-expands `__VA_ARGS__` before handing them on.
pub const VA_ARGS_PROXY: &str = "_VA_ARGS_PROXY";

/// Name of the parameter the counting macro picks the arity macro through.
const SELECTED: &str = "MACRO";

/// Names the generated dispatchers rely on from the consuming library.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DispatchConventions {
    pub va_args_proxy: String,
    pub arg_error_sentinel: String,
}

impl Default for DispatchConventions {
    fn default() -> Self {
        Self {
            va_args_proxy: VA_ARGS_PROXY.to_string(),
            arg_error_sentinel: ARG_ERROR_SENTINEL.to_string(),
        }
    }
}

/// Joins arity macros, highest arity first, with `sentinel` between every pair.
///
/// Message arguments come in `type, name` pairs, so after the caller's arguments the macro
/// for N arguments sits at pair N counted from the end of the list and every other slot
/// holds the sentinel.
pub fn arity_dispatch_list(descending: &[String], sentinel: &str) -> String {
    descending.join(format!(", {sentinel}, ").as_str())
}

/// Formal parameters of the counting macro: one `type, name` pair for every arity the
/// dispatcher can pick below the highest, then `MACRO` and a variadic tail.
pub fn counting_parameters(bound: ArityBound) -> String {
    let mut params = (0..bound.max_arity())
        .map(|i| format!("arg{i}_type, a{i}"))
        .collect::<Vec<_>>();
    params.push(format!("{SELECTED}, ..."));
    params.join(", ")
}

pub struct DispatchTableGenerator<'c> {
    conventions: &'c DispatchConventions,
}

impl<'c> DispatchTableGenerator<'c> {
    pub fn new(conventions: &'c DispatchConventions) -> Self {
        Self { conventions }
    }

    /// Parses every non-blank line of `template` as a directive and emits its dispatcher and
    /// counting macro, in template order.
    pub fn render_all(&self, template: &str, bound: ArityBound) -> Result<String, TemplateError> {
        let directives = template
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| Directive::new(line, index + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let counting = counting_parameters(bound);
        let mut out = Vec::with_capacity(directives.len() * 2);
        for directive in &directives {
            let [dispatcher, getter] = self.render(directive, bound, &counting);
            tracing::debug!(
                line = directive.line,
                macro_name = %directive.base_name(),
                "rendered dispatcher"
            );
            out.push(dispatcher);
            out.push(getter);
        }

        let mut text = out.join("\n");
        text.push('\n');
        Ok(text)
    }

    fn render(&self, directive: &Directive, bound: ArityBound, counting: &str) -> [String; 2] {
        let name = directive.base_name();
        let get_macro = format!("_GET_{name}_MACRO");

        let descending = bound
            .arities()
            .rev()
            .map(|arity| directive.arity_macro(arity))
            .collect::<Vec<_>>();
        let arity_macros = arity_dispatch_list(&descending, &self.conventions.arg_error_sentinel);

        let dispatcher = format!(
            "#define {name}(...) \\\n   {proxy}({get_macro}, (__VA_ARGS__, {arity_macros}))(__VA_ARGS__)",
            proxy = self.conventions.va_args_proxy,
        );
        let getter = format!(
            "#define {get_macro}{arguments} {SELECTED}",
            arguments = directive.arguments(counting),
        );

        [dispatcher, getter]
    }
}
