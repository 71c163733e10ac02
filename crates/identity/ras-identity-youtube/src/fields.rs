//! Translation of normalized profile field names into provider field names.

/// Provider fields for a normalized field name, in request order.
fn provider_fields(field: &str) -> &'static [&'static str] {
    match field {
        "id" => &["id"],
        "username" => &["username"],
        "displayName" => &["name"],
        "name" => &["last_name", "first_name"],
        _ => &[],
    }
}

/// Comma-joined provider field list for `requested` normalized field names.
///
/// Names the provider has no equivalent for are dropped silently, since
/// callers share one field list across strategies.
pub fn map_profile_fields_to_query<S: AsRef<str>>(requested: &[S]) -> String {
    requested
        .iter()
        .flat_map(|field| provider_fields(field.as_ref()))
        .copied()
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_dropped_and_name_expanded() {
        assert_eq!(
            map_profile_fields_to_query(&["id", "name", "unknownField"]),
            "id,last_name,first_name"
        );
    }

    #[test]
    fn test_order_follows_request() {
        assert_eq!(
            map_profile_fields_to_query(&["displayName", "username", "id"]),
            "name,username,id"
        );
    }

    #[test]
    fn test_nothing_known() {
        assert_eq!(map_profile_fields_to_query::<&str>(&[]), "");
        assert_eq!(map_profile_fields_to_query(&["emails".to_string()]), "");
    }
}
