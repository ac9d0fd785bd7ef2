//! Row mapping traits

use crate::error::{EasyError, EasyResult};
use tokio_postgres::Row;

/// Trait for types that can be constructed from a database row.
///
/// # Example
///
/// ```ignore
/// use pgeasy::{FromRow, RowExt, EasyResult};
///
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &tokio_postgres::Row) -> EasyResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             name: row.try_get_column("name")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> EasyResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning EasyError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> EasyResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> EasyResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| EasyError::decode(column, e.to_string()))
    }
}

macro_rules! impl_from_row_tuple {
    ($($idx:tt => $ty:ident),+) => {
        impl<$($ty),+> FromRow for ($($ty,)+)
        where
            $($ty: for<'a> tokio_postgres::types::FromSql<'a>),+
        {
            fn from_row(row: &Row) -> EasyResult<Self> {
                Ok(($(
                    row.try_get::<_, $ty>($idx)
                        .map_err(|e| EasyError::decode(stringify!($idx), e.to_string()))?,
                )+))
            }
        }
    };
}

impl_from_row_tuple!(0 => A);
impl_from_row_tuple!(0 => A, 1 => B);
impl_from_row_tuple!(0 => A, 1 => B, 2 => C);
impl_from_row_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
