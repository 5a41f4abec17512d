//! Core Page trait for page identifiers.
//!
//! A page is an opaque token naming a logical view of the application. The
//! transition machine only ever compares pages for equality and asks them for
//! a stable name to build CSS class names from.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait for page identifiers.
///
/// # Required Traits
///
/// - `Clone`: pages are copied into both reactive slots and the history
/// - `PartialEq`: same-page requests are detected by equality
/// - `Debug`: pages appear in log events
/// - `Serialize` + `DeserializeOwned`: history and phases are serializable
///
/// # Example
///
/// ```rust
/// use transitioner::core::Page;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Route {
///     Home,
///     Settings,
/// }
///
/// impl Page for Route {
///     fn name(&self) -> &str {
///         match self {
///             Self::Home => "home",
///             Self::Settings => "settings",
///         }
///     }
/// }
///
/// assert_eq!(Route::Settings.name(), "settings");
/// ```
pub trait Page: Clone + PartialEq + Debug + Serialize + DeserializeOwned + 'static {
    /// Stable name used in the `from_<name>` / `to_<name>` body classes.
    ///
    /// Whitespace is replaced with `_` when building the class names.
    fn name(&self) -> &str;
}

impl Page for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestPage {
        Home,
        About,
    }

    impl Page for TestPage {
        fn name(&self) -> &str {
            match self {
                Self::Home => "home",
                Self::About => "about",
            }
        }
    }

    #[test]
    fn page_name_returns_correct_value() {
        assert_eq!(TestPage::Home.name(), "home");
        assert_eq!(TestPage::About.name(), "about");
    }

    #[test]
    fn string_page_uses_its_contents() {
        let page = String::from("dashboard");
        assert_eq!(page.name(), "dashboard");
    }

    #[test]
    fn page_serializes_correctly() {
        let page = TestPage::About;
        let json = serde_json::to_string(&page).unwrap();
        let deserialized: TestPage = serde_json::from_str(&json).unwrap();
        assert_eq!(page, deserialized);
    }

    #[test]
    fn page_is_comparable() {
        assert_eq!(TestPage::Home, TestPage::Home.clone());
        assert_ne!(TestPage::Home, TestPage::About);
    }
}
