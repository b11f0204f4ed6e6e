//! Host-facing traits that describe data contexts and their element types.
//!
//! A query binds against a context *type*: [`DataContext::members`] and
//! [`Entity::entity_type`] are type-level descriptors, while
//! [`DataContext::scan`] and [`Entity::field`] read a concrete instance.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Type of a single field on an entity or a synthesized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Bool,
    Integer,
    Float,
    String,
    Optional(Box<FieldType>),
    List(Box<FieldType>),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Bool => write!(f, "bool"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Float => write!(f, "float"),
            FieldType::String => write!(f, "string"),
            FieldType::Optional(inner) => write!(f, "{}?", inner),
            FieldType::List(inner) => write!(f, "[{}]", inner),
        }
    }
}

/// Rust values that can be stored in an entity field.
pub trait FieldValue {
    fn field_type() -> FieldType
    where
        Self: Sized;

    fn to_value(&self) -> Value;
}

macro_rules! integer_field_value {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn field_type() -> FieldType {
                    FieldType::Integer
                }

                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

integer_field_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FieldValue for bool {
    fn field_type() -> FieldType {
        FieldType::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for f32 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldValue for f64 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldValue for String {
    fn field_type() -> FieldType {
        FieldType::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn field_type() -> FieldType {
        FieldType::Optional(Box::new(T::field_type()))
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::List(Box::new(T::field_type()))
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_value).collect())
    }
}

/// Field type of the value an accessor points at. Used by [`entity!`](crate::entity).
pub fn field_type_of<E, T, F>(_accessor: F) -> FieldType
where
    T: FieldValue,
    F: Fn(&E) -> &T,
{
    T::field_type()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Descriptor of an element type: its name and ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityType {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl EntityType {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Looks up a field by its exact (case-sensitive) name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// An element type with named-field access.
pub trait Entity {
    fn entity_type() -> EntityType
    where
        Self: Sized;

    /// Current value of the named field, or `None` if there is no such field.
    fn field(&self, name: &str) -> Option<Value>;
}

/// Implements [`Entity`] for a struct from `"QueryName" => field` pairs.
///
/// ```rust
/// use gadgetry_core::{entity, Entity, FieldType};
///
/// struct Customer {
///     first_name: String,
///     age: u32,
/// }
///
/// entity!(Customer {
///     "First Name" => first_name,
///     "Age" => age,
/// });
///
/// let ty = Customer::entity_type();
/// assert_eq!(ty.field("Age").unwrap().ty, FieldType::Integer);
/// ```
#[macro_export]
macro_rules! entity {
    ($ty:ident { $($name:literal => $field:ident),+ $(,)? }) => {
        impl $crate::Entity for $ty {
            fn entity_type() -> $crate::EntityType {
                $crate::EntityType::new(
                    stringify!($ty),
                    vec![$(
                        $crate::FieldDef::new(
                            $name,
                            $crate::context::field_type_of(|e: &$ty| &e.$field),
                        )
                    ),+],
                )
            }

            fn field(&self, name: &str) -> Option<$crate::Value> {
                match name {
                    $($name => Some($crate::FieldValue::to_value(&self.$field)),)+
                    _ => None,
                }
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MemberShape {
    /// A collection of elements of the given type.
    Collection(EntityType),
    Scalar(FieldType),
}

/// A named member exposed by a data context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    pub shape: MemberShape,
}

impl Member {
    pub fn collection<E: Entity>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: MemberShape::Collection(E::entity_type()),
        }
    }

    pub fn scalar<T: FieldValue>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: MemberShape::Scalar(T::field_type()),
        }
    }
}

/// Lazy sequence of elements read from a context member.
pub type Elements<'a> = Box<dyn Iterator<Item = &'a dyn Entity> + 'a>;

/// Wraps borrowed entities as [`Elements`].
pub fn elements<'a, I, E>(items: I) -> Elements<'a>
where
    I: IntoIterator<Item = &'a E>,
    I::IntoIter: 'a,
    E: Entity + 'a,
{
    Box::new(items.into_iter().map(|item| item as &dyn Entity))
}

/// A host object exposing named collections that queries bind against.
pub trait DataContext {
    /// Type-level description of every member the context exposes.
    fn members() -> Vec<Member>
    where
        Self: Sized;

    /// Iterates the current contents of a collection member.
    ///
    /// Returns `None` if `member` is not a collection of this context.
    fn scan(&self, member: &str) -> Option<Elements<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Product {
        sku: String,
        price: f64,
        tags: Vec<String>,
        discontinued: Option<bool>,
    }

    entity!(Product {
        "Sku" => sku,
        "Unit Price" => price,
        "Tags" => tags,
        "Discontinued" => discontinued,
    });

    #[test]
    fn test_entity_type_from_macro() {
        let ty = Product::entity_type();
        assert_eq!(ty.name, "Product");
        let names: Vec<_> = ty.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Sku", "Unit Price", "Tags", "Discontinued"]);
        assert_eq!(ty.field("Unit Price").unwrap().ty, FieldType::Float);
        assert_eq!(
            ty.field("Tags").unwrap().ty,
            FieldType::List(Box::new(FieldType::String))
        );
        assert_eq!(
            ty.field("Discontinued").unwrap().ty,
            FieldType::Optional(Box::new(FieldType::Bool))
        );
        assert!(ty.field("sku").is_none());
    }

    #[test]
    fn test_entity_field_access() {
        let product = Product {
            sku: "A-1".to_string(),
            price: 9.5,
            tags: vec!["new".to_string()],
            discontinued: None,
        };

        assert_eq!(product.field("Sku"), Some(json!("A-1")));
        assert_eq!(product.field("Unit Price"), Some(json!(9.5)));
        assert_eq!(product.field("Tags"), Some(json!(["new"])));
        assert_eq!(product.field("Discontinued"), Some(Value::Null));
        assert_eq!(product.field("Missing"), None);
    }

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::Integer.to_string(), "integer");
        assert_eq!(
            FieldType::Optional(Box::new(FieldType::List(Box::new(FieldType::String)))).to_string(),
            "[string]?"
        );
    }

    #[test]
    fn test_member_descriptors() {
        let member = Member::collection::<Product>("Products");
        assert!(matches!(member.shape, MemberShape::Collection(ref ty) if ty.name == "Product"));

        let member = Member::scalar::<String>("Company");
        assert_eq!(member.shape, MemberShape::Scalar(FieldType::String));
    }

    #[test]
    fn test_elements_wraps_slice() {
        let products = vec![
            Product {
                sku: "A".to_string(),
                price: 1.0,
                tags: vec![],
                discontinued: Some(false),
            },
            Product {
                sku: "B".to_string(),
                price: 2.0,
                tags: vec![],
                discontinued: Some(true),
            },
        ];

        let skus: Vec<_> = elements(&products)
            .map(|e| e.field("Sku").unwrap())
            .collect();
        assert_eq!(skus, vec![json!("A"), json!("B")]);
    }
}
