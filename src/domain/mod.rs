//! Domain value types for the Kwikswap exchange.
//!
//! Identifiers ([`TokenAddress`], [`AccountId`], [`Asset`]), quantities
//! ([`Amount`], [`Liquidity`]), fee rates ([`BasisPoints`], [`FeeTier`]),
//! time ([`Timestamp`], [`Deadline`]) and the per-call intents the router
//! and migrator accept.  Constructors validate invariants so that a value
//! that exists is a value that can be used.

/// Implements hex `Display`/`FromStr`, a short `Debug` and string-based
/// serde for a 32-byte identifier newtype.
macro_rules! hex_identifier {
    ($name:ident, $label:literal) => {
        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(
                    f,
                    concat!(stringify!($name), "(0x{}…)"),
                    hex::encode(&self.0[..4])
                )
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::error::AmmError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(digits, &mut bytes).map_err(|_| {
                    $crate::error::AmmError::InvalidConfiguration(concat!("malformed ", $label))
                })?;
                Ok(Self(bytes))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use hex_identifier;

mod account_id;
mod amount;
mod asset;
mod basis_points;
mod deadline;
mod fee_tier;
mod liquidity;
mod migration_request;
mod position;
mod requests;
mod rounding;
mod route_amounts;
mod swap_path;
mod swap_result;
mod token_address;
mod token_pair;

pub use account_id::AccountId;
pub use amount::Amount;
pub use asset::Asset;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use deadline::{Deadline, Timestamp};
pub use fee_tier::FeeTier;
pub use liquidity::Liquidity;
pub use migration_request::MigrationRequest;
pub use position::LiquidityPosition;
pub use requests::{AddLiquidity, RemoveLiquidity, SwapExactIn, SwapExactOut};
pub use rounding::Rounding;
pub use route_amounts::RouteAmounts;
pub use swap_path::SwapPath;
pub use swap_result::SwapResult;
pub use token_address::TokenAddress;
pub use token_pair::TokenPair;
