//! Declarative helper for the error enums returned by driven ports.
//!
//! Every port error in this crate has the same shape: unit variants or
//! variants carrying `String` context, a `thiserror` message per variant and a
//! snake-case constructor taking `impl Into<String>` for each field.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : String),+ $(,)? } )? => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: String),+ } )?,
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($( $($field: impl Into<String>),+ )?) -> Self {
                        Self::$variant $( { $($field: $field.into()),+ } )?
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;
