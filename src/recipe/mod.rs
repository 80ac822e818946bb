//! The scaffolding recipe: the ordered steps that turn a fresh Rails
//! skeleton into a starter project.
//!
//! `build_pipeline` only assembles data. Conditional content (Campfire
//! notifications, keeping `test/`) is decided here, once, from the
//! configuration and the collected answers.
//!
//! # Steps
//!
//! | # | Step | Touches |
//! |---|------|---------|
//! | 1-2 | Gemfile, Rakefile default tasks | `Gemfile`, `.env`, `.gitignore`, `Rakefile` |
//! | 3-9 | Application config | `config/application.rb`, environments |
//! | 10-11 | Vagrant VM, Puma | `Vagrantfile`, `chef/`, `bin/restart`, `Procfile` |
//! | 12-20 | Test tooling | `spec/spec_helper.rb`, `Rakefile` |
//! | 21-23 | Audit rake tasks | `lib/tasks/` |
//! | 24-27 | Monitoring, Heroku, Travis | `.env`, `config/newrelic.yml`, `.travis.yml` |
//! | 28-31 | Guard | `Guardfile` |
//! | 32-37 | Docs, static pages, cleanup, secrets, e-mail, initial commit | |

pub mod rails;

use crate::answers::Answers;
use crate::config::ScaffoldConfig;
use crate::engine::ops::Operation;
use crate::engine::pipeline::{Pipeline, Step};
use crate::engine::text::{Pattern, SubstituteMode};
use crate::error::Result;
use crate::templates::{monitoring, project, provisioning, quality, testing};
use rails::{BundlerGroup, GemOptions, command, environment, install_gem, route};
use tracing::debug;

use BundlerGroup::{Ct, Development, Production, Test};

pub const RUBYGEMS_SOURCE: &str = "https://rubygems.org";
pub const INITIAL_COMMIT_MESSAGE: &str =
    "Initial checkin.  Built by thegarage-template Rails Generator";

const DOTENV: &str = ".env";
const GITIGNORE: &str = ".gitignore";
const RAKEFILE: &str = "Rakefile";
const SPEC_HELPER: &str = "spec/spec_helper.rb";
const GUARDFILE: &str = "Guardfile";

fn gem_opts() -> GemOptions {
    GemOptions::new()
}

fn dev_test() -> GemOptions {
    GemOptions::new().groups(&[Development, Test])
}

fn in_group(group: BundlerGroup) -> GemOptions {
    GemOptions::new().group(group)
}

fn before_default_tasks(content: impl Into<String>) -> Operation {
    Operation::insert_before(
        RAKEFILE,
        content,
        Pattern::literal(project::RAKEFILE_DEFAULT_TASKS_ANCHOR),
    )
}

fn after_spec_requires(require: &str) -> Operation {
    Operation::insert_after(
        SPEC_HELPER,
        format!("require '{}'\n", require),
        Pattern::literal(testing::SPEC_HELPER_REQUIRE_ANCHOR),
    )
}

fn substitute_all(path: &str, pattern: &str, replacement: &str) -> Result<Operation> {
    Ok(Operation::substitute(
        path,
        Pattern::regex(pattern)?,
        replacement,
        SubstituteMode::All,
    ))
}

/// Build the full scaffolding pipeline.
pub fn build_pipeline(config: &ScaffoldConfig, answers: &Answers) -> Result<Pipeline> {
    let app_class = config.camelized();
    let mut pipeline = Pipeline::new();

    pipeline.push(
        Step::new("Setup initial project Gemfile")
            .with(Operation::replace(rails::GEMFILE, ""))
            .with(rails::add_source(RUBYGEMS_SOURCE))
            .with(Operation::insert_after(
                rails::GEMFILE,
                project::GEMFILE_RUBY,
                Pattern::regex("source .*\n")?,
            ))
            .with(rails::gem("rails", &gem_opts().version("~> 4.0.1")))
            .with(rails::gem("jquery-rails", &gem_opts()))
            .with(rails::gem("sass-rails", &gem_opts().version("~> 4.0.0")))
            .with(rails::gem("uglifier", &gem_opts().version(">= 1.3.0")))
            .with(rails::gem("haml", &gem_opts().version("~> 4.0.3")))
            .with(rails::gem("rails-console-tweaks", &gem_opts()))
            .with(rails::gem("pg", &gem_opts()))
            .with(rails::gem("pry-rails", &gem_opts()))
            .with(rails::gem("dotenv-rails", &gem_opts()))
            .with(rails::gem("thegarage-gitx", &dev_test()))
            .with(command("bundle package"))
            .with(Operation::create(DOTENV, project::DOTENV))
            .with(Operation::create(".ruby-version", project::RUBY_VERSION))
            .with(Operation::replace(GITIGNORE, project::GITIGNORE)),
    );

    pipeline.push(
        Step::new("Setup Rakefile default_tasks")
            .with(Operation::append(RAKEFILE, project::RAKEFILE_DEFAULT_TASKS)),
    );

    pipeline.push(
        Step::new("Remove turbolinks support by default").with(substitute_all(
            "app/assets/javascripts/application.js",
            r"(?ms)^//= require turbolinks$.",
            "",
        )?),
    );

    pipeline.push(
        Step::new("Configure application route builders")
            .with(environment(&project::application_settings(&app_class))?),
    );

    pipeline.push(
        Step::new("Configure application default timezone")
            .with(environment(project::TIME_ZONE)?),
    );

    pipeline.push(
        Step::new("Add lib/autoloaded to autoload_paths")
            .extend(rails::create_file("lib/autoloaded/.gitkeep", ""))
            .with(environment(project::AUTOLOAD_PATHS)?),
    );

    pipeline.push(
        Step::new("Add debug Bundler group")
            .extend(install_gem("pry-remote", &in_group(BundlerGroup::Debug)))
            .with(Operation::append(DOTENV, project::ENV_BUNDLER_DEBUG_GROUP))
            .with(Operation::insert_after(
                rails::APPLICATION_RB,
                project::BUNDLER_DEBUG_GROUP,
                Pattern::regex(r"Bundler\.require.*\n")?,
            )),
    );

    pipeline.push(
        Step::new("Disable config.assets.debug in development environment").with(
            Operation::comment_out(
                "config/environments/development.rb",
                Pattern::regex("config.assets.debug = true")?,
            ),
        ),
    );

    pipeline.push(
        Step::new("Add staging environment").extend(rails::create_file(
            "config/environments/staging.rb",
            project::staging_rb(&app_class),
        )),
    );

    pipeline.push(
        Step::new("Setup Vagrant Virtual Machine")
            .with(Operation::create("Vagrantfile", provisioning::VAGRANTFILE))
            .with(Operation::append(GITIGNORE, provisioning::VAGRANT_GITIGNORE))
            .with(Operation::create("Berksfile", provisioning::BERKSFILE))
            .with(Operation::replace(
                "config/database.yml",
                project::database_yml(&config.parameterized()),
            ))
            .extend(rails::create_file("chef/node.json", provisioning::CHEF_NODE_JSON))
            .extend(rails::create_file("bin/vm_rails_setup", provisioning::VM_RAILS_SETUP))
            .extend(rails::create_file("chef/roles/.gitkeep", ""))
            .extend(rails::create_file("chef/data_bags/.gitkeep", "")),
    );

    pipeline.push(
        Step::new("Adding Puma as default appserver")
            .extend(install_gem("foreman", &in_group(Development)))
            .extend(install_gem("puma", &gem_opts()))
            .with(Operation::create_dir("bin"))
            .with(Operation::fetch(
                provisioning::REMOTE_RESTART_SCRIPT,
                provisioning::REMOTE_RESTART_SCRIPT,
            ))
            .with(Operation::chmod(provisioning::REMOTE_RESTART_SCRIPT, 0o755))
            .with(Operation::fetch(
                provisioning::REMOTE_PROCFILE,
                provisioning::REMOTE_PROCFILE,
            ))
            .with(Operation::append(DOTENV, project::ENV_APPSERVER_PORT)),
    );

    let rspec_configure = Pattern::regex(r"(?i)RSpec.configure do .*\n")?;
    pipeline.push(
        Step::new("Add Rspec")
            .op_if(!config.skip_test_dir_removal, || Operation::remove("test/"))
            .extend(install_gem("rspec-rails", &dev_test()))
            .with(rails::generate("rspec:install"))
            .with(before_default_tasks(quality::default_task(":spec")))
            .with(environment(testing::RSPEC_GENERATORS)?)
            .with(Operation::insert_after(
                SPEC_HELPER,
                testing::RSPEC_BASE_CONFIG,
                rspec_configure.clone(),
            ))
            .with(Operation::insert_after(
                SPEC_HELPER,
                testing::RSPEC_EXTRA_CONFIG,
                rspec_configure,
            ))
            .with(Operation::comment_out(
                SPEC_HELPER,
                Pattern::regex("config.fixture_path.*")?,
            ))
            .extend(install_gem("shoulda-matchers", &in_group(Test)))
            .extend(install_gem("factory_girl_rails", &dev_test()))
            .extend(install_gem("factory_girl_rspec", &in_group(Test))),
    );

    pipeline.push(
        Step::new("Add simplecov gem")
            .extend(install_gem("simplecov", &in_group(Test).require(false)))
            .with(Operation::prepend(SPEC_HELPER, testing::SIMPLECOV))
            .with(Operation::append(GITIGNORE, testing::SIMPLECOV_GITIGNORE)),
    );

    pipeline.push(
        Step::new("Add Webrat gem")
            .extend(install_gem("webrat", &in_group(Test)))
            .with(after_spec_requires("webrat"))
            .with(Operation::insert_after(
                SPEC_HELPER,
                testing::WEBRAT_MATCHERS,
                Pattern::literal(testing::SPEC_HELPER_EXPECT_ANCHOR),
            )),
    );

    pipeline.push(
        Step::new("Add should_not gem")
            .extend(install_gem("should_not", &in_group(Test)))
            .with(after_spec_requires("should_not/rspec")),
    );

    pipeline.push(
        Step::new("Add webmock gem")
            .extend(install_gem("webmock", &in_group(Test)))
            .with(after_spec_requires("webmock/rspec")),
    );

    pipeline.push(
        Step::new("Add vcr gem")
            .extend(install_gem("vcr", &in_group(Test)))
            .with(after_spec_requires("vcr"))
            .with(Operation::append(SPEC_HELPER, testing::VCR_SETUP)),
    );

    pipeline.push(
        Step::new("Add Rubocop gem")
            .with(Operation::create(".rubocop.yml", quality::RUBOCOP_YML))
            .extend(install_gem("rubocop", &dev_test()))
            .with(before_default_tasks(quality::RUBOCOP_RAKE)),
    );

    pipeline.push(
        Step::new("Add jasmine-rails gem")
            .extend(install_gem("jasmine-rails", &dev_test()))
            .with(route(testing::JASMINE_ROUTE)?)
            .with(before_default_tasks(testing::JASMINE_RAKE))
            .with(Operation::append(GITIGNORE, testing::JASMINE_GITIGNORE))
            .extend(rails::create_file(
                "spec/javascripts/support/jasmine.yml",
                testing::JASMINE_YML,
            )),
    );

    pipeline.push(
        Step::new("Add jshintrb gem")
            .extend(install_gem("jshintrb", &dev_test()))
            .with(Operation::create(".jshintrc", quality::JSHINTRC))
            .with(Operation::create(".jshintignore", quality::JSHINTIGNORE))
            .with(before_default_tasks(quality::JSHINTRB_RAKE)),
    );

    pipeline.push(
        Step::new("Add brakeman:run Rake task")
            .extend(install_gem("brakeman", &gem_opts()))
            .with(before_default_tasks(quality::default_task("'brakeman:run'")))
            .extend(rails::lib("tasks/brakeman.rake", quality::BRAKEMAN_RAKE)),
    );

    pipeline.push(
        Step::new("Add bundler:audit Rake task")
            .extend(install_gem("bundler-audit", &in_group(Test).require(false)))
            .extend(rails::lib("tasks/bundler_audit.rake", quality::BUNDLER_AUDIT_RAKE))
            .with(before_default_tasks(quality::default_task("'bundler:audit'"))),
    );

    pipeline.push(
        Step::new("Add bundler:outdated Rake task")
            .extend(rails::lib(
                "tasks/bundler_outdated.rake",
                quality::BUNDLER_OUTDATED_RAKE,
            ))
            .with(before_default_tasks(quality::default_task("'bundler:outdated'"))),
    );

    pipeline.push(
        Step::new("Add NewRelic gem")
            .extend(install_gem("newrelic_rpm", &gem_opts()))
            .extend(install_gem("newrelic-rake", &gem_opts()))
            .with(Operation::append(
                DOTENV,
                monitoring::newrelic_env(&answers.newrelic_license_key),
            ))
            .with(Operation::create(
                "config/newrelic.yml",
                monitoring::newrelic_yml(&config.app_name),
            )),
    );

    pipeline.push(
        Step::new("Add Honeybadger gem")
            .extend(install_gem("honeybadger", &gem_opts()))
            .with(Operation::append(
                DOTENV,
                monitoring::honeybadger_env(&answers.honeybadger_api_key),
            ))
            .extend(rails::initializer(
                "honeybadger.rb",
                monitoring::HONEYBADGER_INITIALIZER,
            )),
    );

    pipeline.push(
        Step::new("Add Heroku 12factor gem")
            .extend(install_gem("rails_12factor", &in_group(Production))),
    );

    pipeline.push(
        Step::new("Add Travis CI")
            .extend(install_gem("travis", &in_group(Development)))
            .with(Operation::create(".travis.yml", quality::TRAVIS_YML))
            .op_if(answers.campfire.is_some(), || {
                let notifications = answers
                    .campfire
                    .as_ref()
                    .map(monitoring::campfire_notifications)
                    .unwrap_or_default();
                Operation::append(".travis.yml", notifications)
            }),
    );

    pipeline.push(
        Step::new("Add guard-rspec gem")
            .extend(install_gem("guard-rspec", &in_group(Ct)))
            .with(command("guard init rspec"))
            .with(substitute_all(
                GUARDFILE,
                r"(?s)  # Capybara features specs.*\z",
                "end\n",
            )?)
            .with(command("bundle binstubs guard")),
    );

    pipeline.push(
        Step::new("Add guard-rubocop gem")
            .extend(install_gem("guard-rubocop", &in_group(Ct)))
            .with(Operation::append(GUARDFILE, testing::RUBOCOP_GUARDFILE)),
    );

    pipeline.push(
        Step::new("Add guard-jshintrb gem")
            .extend(install_gem("guard-jshintrb", &in_group(Ct)))
            .with(command("guard init jshintrb")),
    );

    pipeline.push(
        Step::new("Add guard-jasmine-rails gem")
            .extend(install_gem("guard-jasmine-rails", &in_group(Ct)))
            .with(Operation::append(GUARDFILE, testing::JASMINE_RAILS_GUARDFILE)),
    );

    pipeline.push(
        Step::new("Add project documentation")
            .with(Operation::create("CONTRIBUTING.md", project::CONTRIBUTING))
            .with(Operation::remove("README.rdoc"))
            .with(Operation::replace("README.md", project::readme_md(&config.app_name))),
    );

    pipeline.push(
        Step::new("Generate /static controller endpoint")
            .with(rails::generate("controller Static --no_helper"))
            .extend(rails::create_file("app/views/static/.gitkeep", ""))
            .with(route(project::STATIC_ROUTE)?),
    );

    pipeline.push(
        Step::new("Cleanup rubocop validations")
            .with(substitute_all(
                "config/environments/test.rb",
                r#"config.static_cache_control = "public, max-age=3600""#,
                quality::TEST_STATIC_CACHE_CONTROL,
            )?)
            .with(substitute_all(rails::ROUTES_RB, r"\n  \n", "")?)
            .with(substitute_all(SPEC_HELPER, "\"", "'")?),
    );

    pipeline.push(
        Step::new("Moving secret key to .env file")
            .with(substitute_all(
                "config/initializers/secret_token.rb",
                " =.*",
                project::SECRET_TOKEN_ASSIGNMENT,
            )?)
            .with(Operation::append(
                DOTENV,
                project::secret_env(&config.secret_key_base),
            )),
    );

    pipeline.push(
        Step::new("Implementing full e-mail support")
            .extend(install_gem("valid_email", &gem_opts()))
            .extend(install_gem("email_spec", &in_group(Test)))
            .extend(install_gem("email_preview", &gem_opts()))
            .with(Operation::append(DOTENV, project::SMTP_ENV))
            .with(environment(project::SMTP_SETTINGS)?)
            .with(after_spec_requires("email_spec"))
            .with(Operation::insert_after(
                SPEC_HELPER,
                testing::EMAIL_SPEC_MATCHERS,
                Pattern::literal(testing::SPEC_HELPER_EXTENSIONS_ANCHOR),
            )),
    );

    pipeline.push(
        Step::new("Finalize initial project")
            .with(command("bundle install --local"))
            .with(rails::git(["init"]))
            .with(rails::git(["add", "."]))
            .with(rails::git(["commit", "-a", "-m", INITIAL_COMMIT_MESSAGE])),
    );

    debug!("built pipeline with {} steps", pipeline.len());
    Ok(pipeline)
}
