//! Campus directory
//!
//! Maps each CSUST campus to the account id (`aid`) the one-card service
//! uses to scope its electricity data. The table is compiled in and never
//! changes at runtime.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A physical CSUST campus
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
pub enum Campus {
    #[strum(serialize = "云塘")]
    Yuntang,
    #[strum(serialize = "金盆岭")]
    Jinpenling,
}

impl Campus {
    /// Upstream account id for this campus
    pub const fn account_id(self) -> &'static str {
        match self {
            Campus::Yuntang => "0030000000002501",
            Campus::Jinpenling => "0030000000002502",
        }
    }
}

/// Resolve a campus name to its account id.
///
/// Returns `None` for names that are not in the directory.
pub fn lookup(campus_name: &str) -> Option<&'static str> {
    campus_name.parse::<Campus>().ok().map(Campus::account_id)
}

/// Accepted campus names, in declaration order.
pub fn known_campuses() -> Vec<&'static str> {
    Campus::iter().map(|c| c.into()).collect()
}

/// Area label the upstream expects, e.g. `云塘校区`
pub(crate) fn area_name(campus_name: &str) -> String {
    format!("{campus_name}校区")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_campuses() {
        assert_eq!(lookup("云塘"), Some("0030000000002501"));
        assert_eq!(lookup("金盆岭"), Some("0030000000002502"));
    }

    #[test]
    fn test_lookup_unknown_campus() {
        assert_eq!(lookup("岳麓山"), None);
        assert_eq!(lookup(""), None);
        // names are matched exactly, the area suffix is not accepted
        assert_eq!(lookup("云塘校区"), None);
    }

    #[test]
    fn test_campus_roundtrips_through_name() {
        for campus in Campus::iter() {
            let name = campus.to_string();
            assert_eq!(name.parse::<Campus>().unwrap(), campus);
            assert_eq!(lookup(&name), Some(campus.account_id()));
        }
    }

    #[test]
    fn test_area_name() {
        assert_eq!(area_name(Campus::Yuntang.as_ref()), "云塘校区");
        assert_eq!(area_name("金盆岭"), "金盆岭校区");
    }

    #[test]
    fn test_known_campuses() {
        assert_eq!(known_campuses(), vec!["云塘", "金盆岭"]);
    }
}
