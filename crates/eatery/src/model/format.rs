use crate::model::Order;

/// Renders an order as `"<quantity> <item>"` pairs joined by `", "`, in the
/// order's own iteration order. An empty order renders as an empty string.
pub fn format_order(order: &Order) -> String {
    order
        .iter()
        .map(|(item, quantity)| format!("{quantity} {item}"))
        .collect::<Vec<_>>()
        .join(", ")
}
