use crate::types::Bindings;

/// Substitution tokens for one arity of the message macro template.
///
/// Names follow the placeholders the template uses: `args`, `arg_types`, `args_signature`
/// and `fwd_args` are the bare lists, their `coma_` siblings carry a leading `, ` so they can
/// be spliced after an argument that is always present.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct ParameterDictionary {
    pub arity: String,
    pub args: String,
    pub arg_types: String,
    pub args_coma: String,
    pub args_signature: String,
    pub coma_args_signature: String,
    pub coma_args: String,
    pub coma_arg_types: String,
    pub fwd_args: String,
    pub coma_fwd_args: String,
}

impl ParameterDictionary {
    pub const KEYS: [&'static str; 10] = [
        "arity",
        "args",
        "arg_types",
        "args_coma",
        "args_signature",
        "coma_args_signature",
        "coma_args",
        "coma_arg_types",
        "fwd_args",
        "coma_fwd_args",
    ];

    pub fn build(arity: usize) -> Self {
        if arity == 0 {
            return ParameterDictionary {
                arity: "0".to_string(),
                ..Default::default()
            };
        }

        let args = (0..arity).map(|i| format!("a{i}")).collect::<Vec<_>>();
        let arg_types = (0..arity).map(|i| format!("arg{i}_type")).collect::<Vec<_>>();
        let pairs = || arg_types.iter().zip(args.iter());

        let interleaved = pairs()
            .map(|(ty, arg)| format!("{ty}, {arg}"))
            .collect::<Vec<_>>()
            .join(", ");
        let args_signature = pairs()
            .map(|(ty, arg)| format!("{ty} {arg}"))
            .collect::<Vec<_>>()
            .join(", ");
        let fwd_args = pairs()
            .map(|(ty, arg)| format!("std::forward<{ty}>({arg})"))
            .collect::<Vec<_>>()
            .join(", ");
        let args = args.join(", ");
        let arg_types = arg_types.join(", ");

        ParameterDictionary {
            arity: arity.to_string(),
            args_coma: format!(", {interleaved}"),
            coma_args_signature: format!(", {args_signature}"),
            coma_args: format!(", {args}"),
            coma_arg_types: format!(", {arg_types}"),
            coma_fwd_args: format!(", {fwd_args}"),
            args,
            arg_types,
            args_signature,
            fwd_args,
        }
    }
}

impl Bindings for ParameterDictionary {
    fn lookup(&self, name: &str) -> Option<&str> {
        let value = match name {
            "arity" => &self.arity,
            "args" => &self.args,
            "arg_types" => &self.arg_types,
            "args_coma" => &self.args_coma,
            "args_signature" => &self.args_signature,
            "coma_args_signature" => &self.coma_args_signature,
            "coma_args" => &self.coma_args,
            "coma_arg_types" => &self.coma_arg_types,
            "fwd_args" => &self.fwd_args,
            "coma_fwd_args" => &self.coma_fwd_args,
            _ => return None,
        };

        Some(value.as_str())
    }
}
