/// Declared property types
///
/// A mapped property's Rust type is written in the definition as a type
/// expression and parsed once, when the mapping context is built:
/// - Simple types: `String`, `i64`, `uuid::Uuid`
/// - Lists: `Vec<T>`, `VecDeque<T>`, `LinkedList<T>`
/// - Sets: `HashSet<T>`, `BTreeSet<T>`
/// - Maps: `HashMap<K, V>`, `BTreeMap<K, V>`
/// - `Option<T>` is transparent and resolves as `T`
///
/// Generic arguments are kept exactly as written; their count is checked by
/// the type resolver, not the parser, so `HashMap<String>` parses fine and
/// fails later with a configuration error naming the property.
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{opt, recognize},
    multi::{many0, separated_list0},
    sequence::delimited,
    IResult, Parser,
};
use std::collections::HashSet;
use std::fmt;

use super::errors::MappingError;

/// Structural kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Looked up in the primitive type table
    Simple,
    List,
    Set,
    Map,
    /// A registered primary-key class; flattened into its own columns
    CompositeKey,
}

impl TypeKind {
    fn from_container_name(name: &str) -> Self {
        match name {
            "Vec" | "VecDeque" | "LinkedList" | "List" => TypeKind::List,
            "HashSet" | "BTreeSet" | "IndexSet" | "Set" => TypeKind::Set,
            "HashMap" | "BTreeMap" | "IndexMap" | "Map" => TypeKind::Map,
            _ => TypeKind::Simple,
        }
    }
}

/// Declared type of a mapped property with reified generic arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    name: String,
    kind: TypeKind,
    args: Vec<DeclaredType>,
}

impl DeclaredType {
    /// Simple (non-generic) type such as `String` or `Uuid`
    pub fn simple(name: impl Into<String>) -> Self {
        DeclaredType {
            name: name.into(),
            kind: TypeKind::Simple,
            args: vec![],
        }
    }

    pub fn list(elem: DeclaredType) -> Self {
        DeclaredType::generic("Vec", vec![elem])
    }

    pub fn set(elem: DeclaredType) -> Self {
        DeclaredType::generic("HashSet", vec![elem])
    }

    pub fn map(key: DeclaredType, value: DeclaredType) -> Self {
        DeclaredType::generic("HashMap", vec![key, value])
    }

    /// Generic type; the container kind is derived from its name
    pub fn generic(name: impl Into<String>, args: Vec<DeclaredType>) -> Self {
        let name = name.into();
        DeclaredType {
            kind: TypeKind::from_container_name(&name),
            name,
            args,
        }
    }

    /// Type of a registered primary-key class
    pub fn composite_key(name: impl Into<String>) -> Self {
        DeclaredType {
            name: name.into(),
            kind: TypeKind::CompositeKey,
            args: vec![],
        }
    }

    /// Parse a Rust type expression
    ///
    /// # Example
    /// ```ignore
    /// let ty = DeclaredType::parse("HashMap<String, i64>")?;
    /// assert_eq!(ty.kind(), TypeKind::Map);
    /// assert_eq!(ty.args().len(), 2);
    /// ```
    pub fn parse(text: &str) -> Result<Self, MappingError> {
        match parse_type_expr(text) {
            Ok((remaining, ty)) => {
                if !remaining.trim().is_empty() {
                    return Err(MappingError::DefinitionParse {
                        error: format!(
                            "unexpected trailing content '{}' in type '{}'",
                            remaining.trim(),
                            text
                        ),
                    });
                }
                Ok(ty)
            }
            Err(e) => Err(MappingError::DefinitionParse {
                error: format!("invalid type '{}': {:?}", text, e),
            }),
        }
    }

    /// Parse a type expression and mark references to primary-key classes
    pub fn parse_with_key_classes(
        text: &str,
        key_classes: &HashSet<&str>,
    ) -> Result<Self, MappingError> {
        let ty = DeclaredType::parse(text)?;
        Ok(ty.mark_composite(key_classes))
    }

    /// Reclassify a simple type as a composite key when it names a
    /// primary-key class
    pub fn mark_composite(self, key_classes: &HashSet<&str>) -> Self {
        if self.kind == TypeKind::Simple && key_classes.contains(self.name.as_str()) {
            DeclaredType::composite_key(self.name)
        } else {
            self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn args(&self) -> &[DeclaredType] {
        &self.args
    }

    pub fn is_composite_key(&self) -> bool {
        self.kind == TypeKind::CompositeKey
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.kind, TypeKind::List | TypeKind::Set | TypeKind::Map)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_collection() || !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        Ok(())
    }
}

fn parse_type_expr(input: &str) -> IResult<&str, DeclaredType> {
    let (input, _) = multispace0(input)?;
    let (input, path) = parse_type_path(input)?;
    let (input, _) = multispace0(input)?;

    let (input, args) = opt(delimited(
        char('<'),
        separated_list0(char(','), parse_type_expr),
        (multispace0, char('>')),
    ))
    .parse(input)?;
    let (input, _) = multispace0(input)?;

    let name = path.rsplit("::").next().unwrap_or(path);
    let mut args = args.unwrap_or_default();

    // Option<T> only affects nullability, which CQL columns always have
    if name == "Option" && args.len() == 1 {
        return Ok((input, args.remove(0)));
    }

    Ok((input, DeclaredType::generic(name, args)))
}

fn parse_type_path(input: &str) -> IResult<&str, &str> {
    recognize((parse_identifier, many0((tag("::"), parse_identifier)))).parse(input)
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize((
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}
