use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a declaration, as assigned by the upstream analyzer.
///
/// Merging only ever compares kinds for equality. The one exception is the
/// mergeable container kind (see [`DeclarationKind::default_mergeable`]), which
/// is the only kind whose comments are scanned for directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    Project,
    ExternalModule,
    Module,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    Accessor,
    TypeAlias,
    Parameter,
    CallSignature,
    ObjectLiteral,
}

impl DeclarationKind {
    /// Kind eligible for `@module` directives when the config doesn't say otherwise.
    pub const fn default_mergeable() -> Self {
        Self::ExternalModule
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::ExternalModule => "externalModule",
            Self::Module => "module",
            Self::Namespace => "namespace",
            Self::Enum => "enum",
            Self::EnumMember => "enumMember",
            Self::Variable => "variable",
            Self::Function => "function",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Constructor => "constructor",
            Self::Property => "property",
            Self::Method => "method",
            Self::Accessor => "accessor",
            Self::TypeAlias => "typeAlias",
            Self::Parameter => "parameter",
            Self::CallSignature => "callSignature",
            Self::ObjectLiteral => "objectLiteral",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
