//! Route templates for span names and metric labels.

/// Collapse identifier segments so every ticket or tenant shares one label.
///
/// Numeric segments become `{id}`. Segments after `devices/` are device
/// fingerprints chosen by clients and become `{device}`.
pub(super) fn route_template(path: &str) -> String {
    let mut template = String::with_capacity(path.len());
    let mut previous = "";

    for segment in path.trim_start_matches('/').split('/') {
        template.push('/');

        if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            template.push_str("{id}");
        } else if previous == "devices" && !segment.is_empty() {
            template.push_str("{device}");
        } else {
            template.push_str(segment);
        }

        previous = segment;
    }

    template
}

#[cfg(test)]
mod tests {
    use super::route_template;

    #[test]
    fn numeric_ids_are_collapsed() {
        assert_eq!(route_template("/tenants/42/tickets"), "/tenants/{id}/tickets");
        assert_eq!(
            route_template("/queue/tickets/981/served"),
            "/queue/tickets/{id}/served"
        );
    }

    #[test]
    fn device_fingerprints_are_collapsed() {
        assert_eq!(
            route_template("/devices/kiosk-a1b2/activation"),
            "/devices/{device}/activation"
        );
        assert_eq!(route_template("/devices"), "/devices");
    }

    #[test]
    fn static_paths_are_unchanged() {
        assert_eq!(route_template("/"), "/");
        assert_eq!(route_template("/queue/current"), "/queue/current");
    }
}
