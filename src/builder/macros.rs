//! Macros for ergonomic state machine construction.

/// Generate a state enum and its [`State`](crate::core::State) impl.
///
/// Each variant's token is its own identifier.
///
/// # Example
///
/// ```
/// use gearshift::state_enum;
/// use gearshift::core::State;
///
/// state_enum! {
///     pub enum DoorState {
///         Open,
///         Ajar,
///         Close,
///     }
/// }
///
/// assert_eq!(DoorState::Ajar.name(), "Ajar");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
