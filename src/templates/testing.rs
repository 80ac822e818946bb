//! Test tooling: Rspec configuration, spec helper extensions and Guardfile
//! blocks.

/// Generator defaults for `config/application.rb`
pub const RSPEC_GENERATORS: &str = r#"config.generators do |g|
      g.view_specs false
      g.stylesheets = false
      g.javascripts = false
      g.helper = false
    end
"#;

pub const RSPEC_BASE_CONFIG: &str = r#"
  config.treat_symbols_as_metadata_keys_with_true_values = true
  config.filter_run focus: true
  config.run_all_when_everything_filtered = true
"#;

pub const RSPEC_EXTRA_CONFIG: &str = r#"
  # enable controller tests to render views
  config.render_views

  # disable foo.should == bar syntax
  config.expect_with :rspec do |c|
    c.syntax = :expect
  end

"#;

/// Anchor inside the Rspec-generated spec helper that requires go after
pub const SPEC_HELPER_REQUIRE_ANCHOR: &str = "require 'rspec/autorun'\n";

/// Anchor at the end of the `expect_with` block in `RSPEC_EXTRA_CONFIG`
pub const SPEC_HELPER_EXPECT_ANCHOR: &str = "c.syntax = :expect\n  end\n\n";

/// Anchor written by `WEBRAT_MATCHERS`
pub const SPEC_HELPER_EXTENSIONS_ANCHOR: &str = "# include extensions into rspec suite\n";

pub const SIMPLECOV: &str = r#"require 'simplecov'
SimpleCov.minimum_coverage 95
SimpleCov.start 'rails'
"#;

pub const SIMPLECOV_GITIGNORE: &str = r#"# Simplecov files
coverage
"#;

pub const WEBRAT_MATCHERS: &str = r#"  # include extensions into rspec suite
  config.include Webrat::Matchers
"#;

pub const VCR_SETUP: &str = r#"
VCR.configure do |c|
  c.cassette_library_dir = 'spec/fixtures/vcr_cassettes'
  c.hook_into :webmock
end
"#;

pub const JASMINE_ROUTE: &str = "mount JasmineRails::Engine => '/specs' if defined?(JasmineRails)";

pub const JASMINE_RAKE: &str = r#"if defined?(JasmineRails)
  default_tasks << 'spec:javascript'
end

"#;

pub const JASMINE_GITIGNORE: &str = r#"# jasmine-rails files
spec/tmp
spec/javascripts/fixtures/generated/
"#;

pub const JASMINE_YML: &str = r#"# list of file expressions to include as specs into spec runner
# relative path from spec_dir
spec_files:
  - "**/*[Ss]pec.{js,coffee}"
"#;

pub const EMAIL_SPEC_MATCHERS: &str = r#"  config.include EmailSpec::Helpers
  config.include EmailSpec::Matchers
"#;

pub const RUBOCOP_GUARDFILE: &str = r#"
guard :rubocop, all_on_start: false, cli: ['--rails'] do
  ignore(%r{db/schema\.rb})
  ignore(%r{vendor/.+\.rb})
  ignore(%r{chef/.+\.rb})
  watch(%r{.+\.rb$})
  watch(%r{(?:.+/)?\.rubocop\.yml$}) { |m| File.dirname(m[0]) }
end
"#;

pub const JASMINE_RAILS_GUARDFILE: &str = r#"
guard 'jasmine-rails', all_on_start: false do
  watch(%r{spec/javascripts/helpers/.+\.(js|coffee)})
  watch(%r{spec/javascripts/.+_spec\.(js\.coffee|js|coffee)$})
  watch(%r{app/assets/javascripts/(.+?)\.(js\.coffee|js|coffee)(?:\.\w+)*$}) { |m| "spec/javascripts/#{ m[1] }_spec.#{ m[2] }" }
end
"#;
