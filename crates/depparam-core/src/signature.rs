//! Signature descriptors
//!
//! A [`Signature`] is computed once, when a callable is defined, and answers
//! two questions: which names are parameters of the callable (used by the
//! decoration engine) and how a [`CallArgs`] binds to those parameters (used
//! by callables to reject arguments they do not accept).

use crate::args::CallArgs;
use crate::error::{CallError, SignatureError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display, Formatter};

/// Parameter kind, in the order kinds must appear in a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Bound by position only
    PositionalOnly,
    /// Bound by position or keyword
    PositionalOrKeyword,
    /// Collects surplus positional values (`*args`)
    VarPositional,
    /// Bound by keyword only
    KeywordOnly,
    /// Collects surplus keywords (`**kwargs`)
    VarKeyword,
}

impl ParamKind {
    /// Can be bound from a positional value
    #[inline]
    #[must_use]
    pub fn is_positional(self) -> bool {
        matches!(self, Self::PositionalOnly | Self::PositionalOrKeyword)
    }

    /// Can be bound from a keyword of the same name
    #[inline]
    #[must_use]
    pub fn accepts_keyword(self) -> bool {
        matches!(self, Self::PositionalOrKeyword | Self::KeywordOnly)
    }

    /// Collects surplus arguments
    #[inline]
    #[must_use]
    pub fn is_variadic(self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }
}

impl Display for ParamKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PositionalOnly => "positional-only",
            Self::PositionalOrKeyword => "positional-or-keyword",
            Self::VarPositional => "variadic positional",
            Self::KeywordOnly => "keyword-only",
            Self::VarKeyword => "variadic keyword",
        })
    }
}

/// One parameter of a signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    kind: ParamKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
}

impl Parameter {
    /// Create parameter without a default
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// Attach a default value
    #[inline]
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Parameter name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Default value, if any
    #[inline]
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Must be supplied by the caller
    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.kind.is_variadic()
    }
}

/// Ordered parameter list of a callable
///
/// A method signature carries an implicit receiver. The receiver is bound
/// from the first positional value and is never addressable by keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSignature")]
pub struct Signature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    receiver: Option<String>,
    parameters: Vec<Parameter>,
}

#[derive(Deserialize)]
struct RawSignature {
    #[serde(default)]
    receiver: Option<String>,
    parameters: Vec<Parameter>,
}

impl TryFrom<RawSignature> for Signature {
    type Error = SignatureError;

    fn try_from(raw: RawSignature) -> Result<Self, Self::Error> {
        Self::try_new(raw.receiver, raw.parameters)
    }
}

impl Signature {
    /// Signature with no parameters
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a signature
    #[inline]
    #[must_use]
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// Validate and create a signature
    ///
    /// # Errors
    /// Rejects duplicate names, out-of-order kinds, repeated variadics and a
    /// required positional parameter after a defaulted one.
    pub fn try_new(
        receiver: Option<String>,
        parameters: Vec<Parameter>,
    ) -> Result<Self, SignatureError> {
        let mut seen = HashSet::new();
        if let Some(name) = &receiver {
            if name.is_empty() {
                return Err(SignatureError::EmptyName);
            }
            seen.insert(name.as_str());
        }

        let mut previous: Option<ParamKind> = None;
        let mut positional_default = false;
        for param in &parameters {
            if param.name.is_empty() {
                return Err(SignatureError::EmptyName);
            }
            if !seen.insert(param.name.as_str()) {
                return Err(SignatureError::DuplicateParameter(param.name.clone()));
            }
            if let Some(prev) = previous {
                if param.kind < prev {
                    return Err(SignatureError::KindOrder {
                        name: param.name.clone(),
                        kind: param.kind.to_string(),
                        previous: prev.to_string(),
                    });
                }
                if param.kind == prev && param.kind.is_variadic() {
                    return Err(SignatureError::DuplicateVariadic(param.kind.to_string()));
                }
            }
            if param.kind.is_positional() {
                if param.default.is_some() {
                    positional_default = true;
                } else if positional_default {
                    return Err(SignatureError::RequiredAfterDefault(param.name.clone()));
                }
            }
            previous = Some(param.kind);
        }

        Ok(Self {
            receiver,
            parameters,
        })
    }

    /// Receiver name for method signatures
    #[inline]
    #[must_use]
    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }

    /// Same parameters without the receiver
    #[must_use]
    pub fn without_receiver(&self) -> Self {
        Self {
            receiver: None,
            parameters: self.parameters.clone(),
        }
    }

    /// Parameters in declaration order, receiver excluded
    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Parameter by name, receiver excluded
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Check whether `name` is a declared parameter (receiver excluded)
    #[inline]
    #[must_use]
    pub fn has_parameter(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn variadic(&self, kind: ParamKind) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.kind == kind)
    }

    /// Bind call arguments to parameters
    ///
    /// Mirrors the usual dynamic-language rules: positionals fill positional
    /// parameters in order, keywords bind by name, surplus goes to the
    /// variadic parameters when present, defaults fill the rest.
    ///
    /// # Errors
    /// Returns the binding [`CallError`] variants, attributed to `func`.
    pub fn bind(&self, func: &str, args: &CallArgs) -> Result<BoundArguments, CallError> {
        let mut values = args.positional().iter();

        let receiver = match &self.receiver {
            Some(name) => Some(values.next().cloned().ok_or_else(|| CallError::MissingArgument {
                func: func.to_string(),
                name: name.clone(),
            })?),
            None => None,
        };

        let positional_params: Vec<&Parameter> = self
            .parameters
            .iter()
            .filter(|p| p.kind.is_positional())
            .collect();
        let var_positional = self.variadic(ParamKind::VarPositional);
        let var_keyword = self.variadic(ParamKind::VarKeyword);

        let mut bound: HashMap<&str, Value> = HashMap::new();
        let mut surplus_positional = Vec::new();
        let mut surplus_keywords = Map::new();

        for (i, value) in values.enumerate() {
            if let Some(param) = positional_params.get(i) {
                bound.insert(param.name.as_str(), value.clone());
            } else if var_positional.is_some() {
                surplus_positional.push(value.clone());
            } else {
                let offset = usize::from(self.receiver.is_some());
                return Err(CallError::TooManyPositional {
                    func: func.to_string(),
                    expected: positional_params.len() + offset,
                    given: args.positional().len(),
                });
            }
        }

        for (name, value) in args.keywords() {
            match self.get(name) {
                Some(param) if param.kind.accepts_keyword() => {
                    if bound.contains_key(name.as_str()) {
                        return Err(CallError::MultipleValues {
                            func: func.to_string(),
                            name: name.clone(),
                        });
                    }
                    bound.insert(param.name.as_str(), value.clone());
                }
                _ if var_keyword.is_some() => {
                    surplus_keywords.insert(name.clone(), value.clone());
                }
                _ => {
                    return Err(CallError::UnexpectedKeyword {
                        func: func.to_string(),
                        name: name.clone(),
                    });
                }
            }
        }

        let mut arguments = IndexMap::with_capacity(self.parameters.len());
        for param in &self.parameters {
            let value = match param.kind {
                ParamKind::VarPositional => Value::Array(std::mem::take(&mut surplus_positional)),
                ParamKind::VarKeyword => Value::Object(std::mem::take(&mut surplus_keywords)),
                _ => match bound.remove(param.name.as_str()) {
                    Some(value) => value,
                    None => param.default.clone().ok_or_else(|| CallError::MissingArgument {
                        func: func.to_string(),
                        name: param.name.clone(),
                    })?,
                },
            };
            arguments.insert(param.name.clone(), value);
        }

        Ok(BoundArguments {
            receiver,
            arguments,
        })
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(receiver) = &self.receiver {
            parts.push(receiver.clone());
        }

        let has_var_positional = self.variadic(ParamKind::VarPositional).is_some();
        let mut previous: Option<ParamKind> = None;
        for param in &self.parameters {
            if previous == Some(ParamKind::PositionalOnly) && param.kind != ParamKind::PositionalOnly {
                parts.push("/".to_string());
            }
            if param.kind == ParamKind::KeywordOnly
                && !has_var_positional
                && previous != Some(ParamKind::KeywordOnly)
            {
                parts.push("*".to_string());
            }
            let rendered = match (param.kind, &param.default) {
                (ParamKind::VarPositional, _) => format!("*{}", param.name),
                (ParamKind::VarKeyword, _) => format!("**{}", param.name),
                (_, Some(default)) => format!("{}={}", param.name, default),
                (_, None) => param.name.clone(),
            };
            parts.push(rendered);
            previous = Some(param.kind);
        }
        if previous == Some(ParamKind::PositionalOnly) {
            parts.push("/".to_string());
        }

        write!(f, "({})", parts.join(", "))
    }
}

/// Builder for [`Signature`]
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct SignatureBuilder {
    receiver: Option<String>,
    parameters: Vec<Parameter>,
}

impl SignatureBuilder {
    /// Declare an implicit receiver
    pub fn receiver(mut self, name: impl Into<String>) -> Self {
        self.receiver = Some(name.into());
        self
    }

    /// Add any parameter
    pub fn param(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Add a positional-only parameter
    pub fn positional_only(self, name: impl Into<String>) -> Self {
        self.param(Parameter::new(name, ParamKind::PositionalOnly))
    }

    /// Add a positional-or-keyword parameter
    pub fn positional(self, name: impl Into<String>) -> Self {
        self.param(Parameter::new(name, ParamKind::PositionalOrKeyword))
    }

    /// Add a positional-or-keyword parameter with a default
    pub fn positional_with_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.param(Parameter::new(name, ParamKind::PositionalOrKeyword).with_default(default))
    }

    /// Add `*name`
    pub fn var_positional(self, name: impl Into<String>) -> Self {
        self.param(Parameter::new(name, ParamKind::VarPositional))
    }

    /// Add a keyword-only parameter
    pub fn keyword_only(self, name: impl Into<String>) -> Self {
        self.param(Parameter::new(name, ParamKind::KeywordOnly))
    }

    /// Add a keyword-only parameter with a default
    pub fn keyword_only_with_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.param(Parameter::new(name, ParamKind::KeywordOnly).with_default(default))
    }

    /// Add `**name`
    pub fn var_keyword(self, name: impl Into<String>) -> Self {
        self.param(Parameter::new(name, ParamKind::VarKeyword))
    }

    /// Validate and build
    ///
    /// # Errors
    /// See [`Signature::try_new`].
    pub fn build(self) -> Result<Signature, SignatureError> {
        Signature::try_new(self.receiver, self.parameters)
    }
}

/// Arguments bound to parameter names
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArguments {
    receiver: Option<Value>,
    arguments: IndexMap<String, Value>,
}

impl BoundArguments {
    /// Receiver value for method calls
    #[inline]
    #[must_use]
    pub fn receiver(&self) -> Option<&Value> {
        self.receiver.as_ref()
    }

    /// Bound value by parameter name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// Take a bound value out
    #[inline]
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.arguments.shift_remove(name)
    }

    /// All bound values in parameter order
    #[inline]
    #[must_use]
    pub fn arguments(&self) -> &IndexMap<String, Value> {
        &self.arguments
    }
}
