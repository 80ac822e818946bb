//! Core project files: Gemfile companions, `.env`, application settings,
//! environments, database config and documentation.

use super::{TemplateVars, render};

pub const RUBY_VERSION: &str = "2.0.0-p247";

/// Ruby version pinned in the Gemfile
pub const GEMFILE_RUBY: &str = "ruby '2.0.0'";

pub const GITIGNORE: &str = include_str!("../../templates/gitignore");

/// Initial `.env`
pub const DOTENV: &str = r#"# options for building urls
DEFAULT_URL_PROTOCOL=http
DEFAULT_URL_HOST=localhost:3000

"#;

pub const RAKEFILE_DEFAULT_TASKS: &str = "\n\ndefault_tasks = []\n\ntask default: default_tasks\n";

/// Anchor every rake task registration is inserted before
pub const RAKEFILE_DEFAULT_TASKS_ANCHOR: &str = "task default: default_tasks";

const APPLICATION_SETTINGS: &str = r##"# configure asset hosts for controllers + mailers
    asset_host = "#{ENV['DEFAULT_URL_PROTOCOL']}://#{ENV['DEFAULT_URL_HOST']}"
    config.action_controller.asset_host = asset_host
    config.action_mailer.asset_host = asset_host

    # configure url helpers to use the options from env
    default_url_options = {
      host: ENV['DEFAULT_URL_HOST'],
      protocol: ENV['DEFAULT_URL_PROTOCOL']
    }
    {{app_class}}::Application.routes.default_url_options = default_url_options
    config.action_mailer.default_url_options = default_url_options

    # use SSL, use Strict-Transport-Security, and use secure cookies
    config.force_ssl = (ENV['DEFAULT_URL_PROTOCOL'] == 'https')
"##;

/// Asset host, url helper and SSL settings for `config/application.rb`
pub fn application_settings(app_class: &str) -> String {
    render(APPLICATION_SETTINGS, &[(TemplateVars::APP_CLASS, app_class)])
}

pub const TIME_ZONE: &str = "config.time_zone = 'Central Time (US & Canada)'";

pub const AUTOLOAD_PATHS: &str = "config.autoload_paths << config.root.join('lib', 'autoloaded')";

/// Debug group require, inserted after the stock `Bundler.require` line
pub const BUNDLER_DEBUG_GROUP: &str = r#"
# Delay requiring debug group until dotenv-rails has been required
# which loads the necessary ENV variables
Bundler.require(:debug) if %w{ development test }.include?(Rails.env) && ENV['BUNDLER_INCLUDE_DEBUG_GROUP'] == 'true'
"#;

pub const ENV_BUNDLER_DEBUG_GROUP: &str = r#"# enable debug gems in development/test mode
BUNDLER_INCLUDE_DEBUG_GROUP=true

"#;

const STAGING: &str = r#"# Based on production defaults
require Rails.root.join('config/environments/production')

# customize and override production settings here
{{app_class}}::Application.configure do
end
"#;

/// `config/environments/staging.rb`
pub fn staging_rb(app_class: &str) -> String {
    render(STAGING, &[(TemplateVars::APP_CLASS, app_class)])
}

const DATABASE_YML: &str = r#"default: &default
  adapter: postgresql
  host: localhost
  username: 'postgres'

development:
  <<: *default
  database: {{db_prefix}}-dev

# Warning: The database defined as "test" will be erased and
# re-generated from your development database when you run "rake".
# Do not set this db to the same as development or production.
test: &test
  <<: *default
  database: {{db_prefix}}-test

staging:
  <<: *default
  database: {{db_prefix}}-stage

production:
  <<: *default
  database: {{db_prefix}}-prod

"#;

/// `config/database.yml` with one database per environment
pub fn database_yml(db_prefix: &str) -> String {
    render(DATABASE_YML, &[(TemplateVars::DB_PREFIX, db_prefix)])
}

pub const ENV_APPSERVER_PORT: &str = r#"# options for appserver
PORT=3000

"#;

pub const CONTRIBUTING: &str = include_str!("../../templates/CONTRIBUTING.md");

const README: &str = include_str!("../../templates/README.md");

pub fn readme_md(app_name: &str) -> String {
    render(README, &[(TemplateVars::APP_NAME, app_name)])
}

pub const STATIC_ROUTE: &str = "get 'static/:action' => 'static#:action' if Rails.env.development?";

const SECRET_ENV: &str = r#"
# secret key used by rails for generating session cookies
# see config/initializers/secret_token.rb
SECRET_KEY_BASE={{key}}
"#;

/// `.env` entry holding the session secret
pub fn secret_env(secret: &str) -> String {
    render(SECRET_ENV, &[(TemplateVars::KEY, secret)])
}

pub const SECRET_TOKEN_ASSIGNMENT: &str = " = ENV['SECRET_KEY_BASE']";

pub const SMTP_ENV: &str = r#"#SMTP settings
SMTP_PORT=1025
SMTP_SERVER=localhost
"#;

pub const SMTP_SETTINGS: &str = r#"config.action_mailer.smtp_settings = {
      port: ENV['SMTP_PORT'],
      address: ENV['SMTP_SERVER']
    }
"#;
