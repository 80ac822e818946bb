//! Error tracking, performance monitoring and CI notification settings.

use super::{TemplateVars, render};
use crate::answers::CampfireNotifications;

const NEWRELIC_ENV: &str = r#"# newrelic license key
# https://docs.newrelic.com/docs/ruby/ruby-agent-configuration
NEW_RELIC_LICENSE_KEY={{key}}

"#;

pub fn newrelic_env(license_key: &str) -> String {
    render(NEWRELIC_ENV, &[(TemplateVars::KEY, license_key)])
}

const NEWRELIC_YML: &str = include_str!("../../templates/newrelic.yml");

/// `config/newrelic.yml` reporting under the application's name
pub fn newrelic_yml(app_name: &str) -> String {
    render(NEWRELIC_YML, &[(TemplateVars::APP_NAME, app_name)])
}

const HONEYBADGER_ENV: &str = r#"# honey badger account info
HONEY_BADGER_API_KEY={{key}}
"#;

pub fn honeybadger_env(api_key: &str) -> String {
    render(HONEYBADGER_ENV, &[(TemplateVars::KEY, api_key)])
}

/// `config/initializers/honeybadger.rb`
pub const HONEYBADGER_INITIALIZER: &str = r#"  custom_env_filters = %w{
    HONEY_BADGER_API_KEY
    PGBACKUPS_URL
    HEROKU_POSTGRESQL_COBALT_URL
    DATABASE_URL
}

Honeybadger.configure do |config|
  config.api_key = ENV['HONEY_BADGER_API_KEY']
  config.params_filters.concat custom_env_filters
end
"#;

/// Travis `notifications` block for a Campfire room
pub fn campfire_notifications(campfire: &CampfireNotifications) -> String {
    format!(
        "notifications:\n  campfire: {}\n  on_success: change\n  on_failure: always\n",
        campfire.room_spec()
    )
}
