//! Route navigator used by the HTTP layer.

use crate::actions::invoice::{Navigation, Navigator};

/// Mints the control-transfer token the handlers turn into a redirect.
#[derive(Debug, Default, Clone, Copy)]
pub struct RouteNavigator;

impl Navigator for RouteNavigator {
    fn navigate_to(&self, path: &str) -> Navigation {
        Navigation {
            target: path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_carries_the_requested_target() {
        let nav = RouteNavigator.navigate_to("/dashboard/invoices");
        assert_eq!(nav.target, "/dashboard/invoices");
    }
}
