//! Macros for declaring page identifiers.

/// Generate a `Page` implementation for a fieldless enum.
///
/// Each variant's page name defaults to the variant name; give an explicit
/// class-friendly name with `Variant => "name"`.
///
/// # Example
///
/// ```
/// use transitioner::page_enum;
/// use transitioner::core::Page;
///
/// page_enum! {
///     pub enum Route {
///         Home => "home",
///         Settings => "settings",
///         NotFound,
///     }
/// }
///
/// assert_eq!(Route::Home.name(), "home");
/// assert_eq!(Route::NotFound.name(), "NotFound");
/// ```
#[macro_export]
macro_rules! page_enum {
    (@name $variant:ident) => {
        stringify!($variant)
    };
    (@name $variant:ident $label:literal) => {
        $label
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(=> $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Page for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::page_enum!(@name $variant $($label)?)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Page;

    page_enum! {
        enum TestPage {
            Home => "home",
            About => "about",
            Contact,
        }
    }

    #[test]
    fn page_enum_macro_generates_trait() {
        assert_eq!(TestPage::Home.name(), "home");
        assert_eq!(TestPage::About.name(), "about");
        assert_eq!(TestPage::Contact.name(), "Contact");
    }

    #[test]
    fn page_enum_supports_visibility() {
        page_enum! {
            pub enum PublicPage {
                A,
                B,
            }
        }

        assert_ne!(PublicPage::A, PublicPage::B);
    }

    #[test]
    fn page_enum_pages_drive_transitions() {
        use crate::host::MemoryBody;
        use crate::machine::Transitioner;
        use crate::reactive::Tracker;
        use std::rc::Rc;

        let tracker = Tracker::new();
        let body = Rc::new(MemoryBody::new());
        let transitioner = Transitioner::new(Rc::new(tracker.clone()), body.clone());

        transitioner.transition(TestPage::Home);
        transitioner.transition(TestPage::Contact);
        tracker.flush();

        assert!(body.has_class("from_home"));
        assert!(body.has_class("to_Contact"));
    }
}
