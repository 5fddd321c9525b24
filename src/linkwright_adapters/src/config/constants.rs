pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const SUPABASE_URL_ENV_VAR: &str = "SUPABASE_URL";
    pub const SUPABASE_ANON_KEY_ENV_VAR: &str = "SUPABASE_ANON_KEY";
    pub const SUPABASE_SERVICE_ROLE_KEY_ENV_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
    pub const CONFIG_ENV_PREFIX: &str = "LINKWRIGHT";
}

pub mod supabase {
    pub const USER_PATH: &str = "/auth/v1/user";
    pub const GENERATE_LINK_PATH: &str = "/auth/v1/admin/generate_link";
    pub const API_KEY_HEADER: &str = "apikey";
    pub const DEFAULT_TIMEOUT_IN_MILLIS: u64 = 10_000;
}

pub mod cors {
    /// Headers supabase-js sends with every function invocation.
    pub const ALLOWED_HEADERS: [&str; 4] = ["authorization", "x-client-info", "apikey", "content-type"];
}

pub mod local {
    pub const DEFAULT_LINK_TTL_IN_SECONDS: i64 = 24 * 60 * 60;
    pub const DEFAULT_SESSION_TTL_IN_SECONDS: i64 = 60 * 60;
    pub const MAX_TTL_IN_SECONDS: i64 = 365 * 24 * 60 * 60;
    pub const VERIFY_PATH: &str = "verify";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const PUBLIC_URL: &str = "http://127.0.0.1:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod supabase {
        use std::time::Duration;

        pub const ANON_KEY: &str = "test-anon-key";
        pub const SERVICE_ROLE_KEY: &str = "test-service-role-key";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
