//! Main navigation and current-page highlighting.

/// A navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

/// Links in the site header, in display order.
pub const MAIN_NAV: &[NavLink] = &[
    NavLink {
        href: "/",
        label: "Home",
    },
    NavLink {
        href: "/shop",
        label: "Shop",
    },
];

/// A navigation link resolved against the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    /// Rendered with the `active` class and `aria-current="page"`.
    pub active: bool,
}

/// Page name of a path: its last segment, lowercased, with the site root
/// and an empty segment both naming `index.html`.
#[must_use]
pub fn page_name(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    if last.is_empty() {
        "index.html".to_string()
    } else {
        last.to_lowercase()
    }
}

/// Whether `href` points at the page served at `current_path`.
#[must_use]
pub fn is_current(href: &str, current_path: &str) -> bool {
    page_name(href) == page_name(current_path)
}

/// The main navigation with the current page marked active.
#[must_use]
pub fn main_nav(current_path: &str) -> Vec<NavItem> {
    MAIN_NAV
        .iter()
        .map(|link| NavItem {
            href: link.href,
            label: link.label,
            active: is_current(link.href, current_path),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_name() {
        assert_eq!(page_name("/"), "index.html");
        assert_eq!(page_name(""), "index.html");
        assert_eq!(page_name("/index.html"), "index.html");
        assert_eq!(page_name("/Shop"), "shop");
        assert_eq!(page_name("/product?id=vst-001"), "product");
    }

    #[test]
    fn test_root_and_index_are_equivalent() {
        assert!(is_current("/", "/index.html"));
        assert!(is_current("/index.html", "/"));
        assert!(!is_current("/", "/shop"));
    }

    #[test]
    fn test_exactly_one_active() {
        let items = main_nav("/shop");
        let active: Vec<&str> = items.iter().filter(|i| i.active).map(|i| i.label).collect();
        assert_eq!(active, vec!["Shop"]);
    }

    #[test]
    fn test_no_active_on_other_pages() {
        assert!(main_nav("/product").iter().all(|i| !i.active));
    }
}
