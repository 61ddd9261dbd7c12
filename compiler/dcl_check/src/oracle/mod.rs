//! Resolution oracle.
//!
//! The checker never inspects declarations directly; it asks a
//! [`ResolutionOracle`]. A failed lookup is data (`None` or `false`), never
//! an error.

use std::fmt;

use dcl_ir::{Name, StringInterner};
use dcl_parse::{Decl, SourceUnit, BUILTIN_TYPES};
use rustc_hash::{FxHashMap, FxHashSet};

/// A resolved type: a type name plus nullability.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: Name,
    pub nullable: bool,
}

impl TypeRef {
    pub const fn non_null(name: Name) -> Self {
        TypeRef {
            name,
            nullable: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Value,
    Class,
    /// A declared or builtin type name.
    Type,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Value => write!(f, "value"),
            DeclarationKind::Class => write!(f, "class"),
            DeclarationKind::Type => write!(f, "type"),
        }
    }
}

/// What an identifier resolved to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub name: Name,
    pub kind: DeclarationKind,
    /// The value's declared type, or the class/type itself.
    pub ty: TypeRef,
}

/// Name lookup as seen from one analysis unit.
pub trait ResolutionOracle {
    /// Resolve an identifier used as a receiver or class-literal operand.
    fn resolve(&self, name: Name) -> Option<Declaration>;

    /// Whether `name` is a known type, for type arguments.
    fn resolve_type(&self, name: Name) -> bool;

    /// Whether values of type `receiver` have a member `member`, either
    /// declared in the class or as an extension. Nullability is ignored.
    fn has_member(&self, receiver: TypeRef, member: Name) -> bool;

    /// Whether `name` is a top-level function, for `::name`.
    fn resolve_function(&self, name: Name) -> bool;
}

/// Oracle answering from one unit's declarations.
///
/// Values shadow classes of the same name; classes shadow declared types.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    values: FxHashMap<Name, TypeRef>,
    /// Class name to its members.
    classes: FxHashMap<Name, FxHashSet<Name>>,
    types: FxHashSet<Name>,
    /// Receiver type name to extension members.
    extensions: FxHashMap<Name, FxHashSet<Name>>,
    functions: FxHashSet<Name>,
}

impl SymbolTable {
    /// An empty table that still knows the builtin types.
    pub fn new(interner: &StringInterner) -> Self {
        SymbolTable {
            types: BUILTIN_TYPES.iter().map(|t| interner.intern(t)).collect(),
            ..SymbolTable::default()
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(decls = unit.decls.len()))]
    pub fn from_unit(unit: &SourceUnit, interner: &StringInterner) -> Self {
        let mut table = SymbolTable::new(interner);
        for decl in &unit.decls {
            table.declare(decl);
        }
        table
    }

    /// Add one declaration. Later declarations of the same name and
    /// category replace earlier ones.
    pub fn declare(&mut self, decl: &Decl) {
        match decl {
            Decl::Class { name, members, .. } => {
                self.classes
                    .insert(*name, members.iter().copied().collect());
            }
            Decl::Value { name, ty, .. } => {
                self.values.insert(
                    *name,
                    TypeRef {
                        name: ty.name,
                        nullable: ty.nullable,
                    },
                );
            }
            Decl::Type { name, .. } => {
                self.types.insert(*name);
            }
            Decl::Extension {
                receiver, member, ..
            } => {
                self.extensions.entry(*receiver).or_default().insert(*member);
            }
            Decl::Function { name, .. } => {
                self.functions.insert(*name);
            }
        }
    }
}

impl ResolutionOracle for SymbolTable {
    fn resolve(&self, name: Name) -> Option<Declaration> {
        if let Some(ty) = self.values.get(&name) {
            return Some(Declaration {
                name,
                kind: DeclarationKind::Value,
                ty: *ty,
            });
        }
        let kind = if self.classes.contains_key(&name) {
            DeclarationKind::Class
        } else if self.types.contains(&name) {
            DeclarationKind::Type
        } else {
            return None;
        };
        Some(Declaration {
            name,
            kind,
            ty: TypeRef::non_null(name),
        })
    }

    fn resolve_type(&self, name: Name) -> bool {
        self.classes.contains_key(&name) || self.types.contains(&name)
    }

    fn has_member(&self, receiver: TypeRef, member: Name) -> bool {
        let in_class = self
            .classes
            .get(&receiver.name)
            .is_some_and(|members| members.contains(&member));
        in_class
            || self
                .extensions
                .get(&receiver.name)
                .is_some_and(|members| members.contains(&member))
    }

    fn resolve_function(&self, name: Name) -> bool {
        self.functions.contains(&name)
    }
}
