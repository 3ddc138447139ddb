use serde_json::json;

use crate::compose::access::AuthPaths;
use crate::compose::config::AuthConfig;
use crate::host::GeneratedFile;

/// Build the two artifacts the admin UI build step materializes: the
/// provider route-handler descriptor and the network-layer config.
///
/// Template rendering belongs to the host's build tooling; these are JSON
/// descriptors carrying everything the templates need.
pub(crate) fn auth_files(config: &AuthConfig, paths: &AuthPaths) -> Vec<GeneratedFile> {
    let provider_routes = json!({
        "provider": config.provider(),
        "mountPath": config.mount_path(),
        "listKey": config.list_key(),
        "identityField": config.identity_field(),
        "routes": paths.public_pages(),
    });

    let network_config = json!({
        "mountPath": config.mount_path(),
        "autoCreate": config.auto_create(),
        "userMap": config.user_map(),
        "accountMap": config.account_map(),
        "profileMap": config.profile_map(),
    });

    vec![
        GeneratedFile {
            output_path: "api/auth/provider.json".into(),
            contents: pretty(&provider_routes),
        },
        GeneratedFile {
            output_path: "network-config.json".into(),
            contents: pretty(&network_config),
        },
    ]
}

fn pretty(value: &serde_json::Value) -> String {
    // json! output always serializes
    serde_json::to_string_pretty(value).expect("serializable descriptor")
}
