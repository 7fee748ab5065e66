//! Status vocabularies.
//!
//! Every compartmental model defines a small closed set of statuses.  The
//! engine only needs to count them, name them in output, and compare them,
//! so a model's status enum implements [`Status`] and nothing else.
//! [`compartments!`](crate::compartments) generates both the enum and the
//! impl.

use std::fmt::Debug;
use std::hash::Hash;

pub trait Status: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every status in column order.  `ALL[s.index()] == s`.
    const ALL: &'static [Self];

    /// Short label used in output columns and logs.  At most 8 bytes.
    fn name(self) -> &'static str;

    /// Position in [`ALL`](Self::ALL).
    fn index(self) -> usize;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }
}

/// Declare a status enum and its [`Status`] impl in one go.
///
/// ```
/// et_agent::compartments! {
///     /// Classic SIR.
///     pub enum Sir {
///         S => "S",
///         I => "I",
///         R => "R",
///     }
/// }
///
/// use et_agent::Status;
/// assert_eq!(Sir::ALL, &[Sir::S, Sir::I, Sir::R]);
/// assert_eq!(Sir::I.name(), "I");
/// assert_eq!(Sir::R.index(), 2);
/// ```
#[macro_export]
macro_rules! compartments {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vattr:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $($(#[$vattr])* $variant),+
        }

        impl $crate::Status for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            #[inline]
            fn index(self) -> usize {
                self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::Status::name(*self))
            }
        }
    };
}
