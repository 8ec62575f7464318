//! Intents the NLU platform resolves for this webhook.

use std::str::FromStr;
use thiserror::Error;

/// The fixed set of intents this backend serves, parsed from the platform's
/// intent display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    NewOrder,
    AddItem,
    RemoveItem,
    CompleteOrder,
    TrackOrder,
}

/// The platform sent an intent display name this webhook does not serve.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("unknown intent: {0}")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(display_name: &str) -> Result<Self, Self::Err> {
        match display_name {
            "new.order" => Ok(Intent::NewOrder),
            "order.add - context: ongoing-order" => Ok(Intent::AddItem),
            "order.remove - context: ongoing-order" => Ok(Intent::RemoveItem),
            "order.complete - context: ongoing-order" => Ok(Intent::CompleteOrder),
            "track.order - context: ongoing-tracking" => Ok(Intent::TrackOrder),
            other => Err(UnknownIntent(other.to_string())),
        }
    }
}
