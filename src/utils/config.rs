//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default timeout for CF and BOSH requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1";

/// Default BOSH director port
pub const DEFAULT_BOSH_PORT: &str = "25555";

/// Matches both the legacy `cf-<env>` and the cf-deployment `cf` names
pub const DEFAULT_DEPLOYMENT_PATTERN: &str = "^cf($|-.+)";

/// Jobs hosting application containers (DEA runners and Diego cells)
pub const DEFAULT_RUNTIME_JOB_PATTERN: &str = "^(runner|dea|diego_cell|cell|compute)";

/// Page size requested from the CF API
pub const CF_PAGE_SIZE: usize = 100;

/// UAA client used for the password grant (the public cf CLI client)
pub const CF_OAUTH_CLIENT: &str = "cf";

// Port bounds (0 and 65536 are both rejected)
pub const MIN_PORT: u32 = 1;
pub const MAX_PORT: u32 = 65535;
