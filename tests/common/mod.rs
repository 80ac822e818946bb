//! Shared fakes for integration tests: a recording command runner, an
//! in-memory fetcher and a minimal `rails new` skeleton.

#![allow(dead_code)]

use railyard::command_runner::{CommandOutput, CommandRunner, CommandSpec};
use railyard::error::OperationError;
use railyard::fetch::Fetcher;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const SPEC_HELPER: &str = "# This file is copied to spec/ when you run 'rails generate rspec:install'
ENV[\"RAILS_ENV\"] ||= 'test'
require File.expand_path(\"../../config/environment\", __FILE__)
require 'rspec/rails'
require 'rspec/autorun'

# Requires supporting ruby files with custom matchers and macros, etc,
# in spec/support/ and its subdirectories.
Dir[Rails.root.join(\"spec/support/**/*.rb\")].each { |f| require f }

RSpec.configure do |config|
  # Remove this line if you're not using ActiveRecord or ActiveRecord fixtures
  config.fixture_path = \"#{::Rails.root}/spec/fixtures\"

  config.use_transactional_fixtures = true
  config.order = \"random\"
end
";

pub const GUARDFILE: &str = "guard :rspec do
  watch(%r{^spec/.+_spec\\.rb$})
  watch('spec/spec_helper.rb')  { \"spec\" }

  # Capybara features specs
  watch(%r{^app/views/(.+)/.*\\.(erb|haml)$})     { |m| \"spec/features/#{m[1]}_spec.rb\" }
end
";

/// Records every command and simulates the generators the recipe relies on.
#[derive(Default)]
pub struct FakeRunner {
    pub calls: Vec<String>,
    /// Commands (as displayed) that exit with status 1
    pub failing: Vec<String>,
}

impl FakeRunner {
    pub fn failing_on(command: &str) -> Self {
        Self {
            failing: vec![command.to_string()],
            ..Self::default()
        }
    }

    pub fn ran(&self, command: &str) -> bool {
        self.calls.iter().any(|c| c == command)
    }
}

impl CommandRunner for FakeRunner {
    fn run(&mut self, spec: &CommandSpec, cwd: &Path) -> Result<CommandOutput, OperationError> {
        let line = spec.to_string();
        self.calls.push(line.clone());

        if self.failing.contains(&line) {
            return Ok(CommandOutput {
                stderr: format!("{} exploded", spec.program),
                exit_code: Some(1),
                success: false,
                ..CommandOutput::default()
            });
        }

        let write = |relative: &str, content: &str| -> Result<(), OperationError> {
            let path = cwd.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| OperationError::io(parent, e))?;
            }
            fs::write(&path, content).map_err(|e| OperationError::io(path, e))
        };

        match line.as_str() {
            "ruby bin/rails generate rspec:install" => write("spec/spec_helper.rb", SPEC_HELPER)?,
            "guard init rspec" => write("Guardfile", GUARDFILE)?,
            _ => {}
        }

        Ok(CommandOutput::ok())
    }
}

/// Serves template files from memory.
#[derive(Default)]
pub struct FakeFetcher {
    pub files: HashMap<String, Vec<u8>>,
}

impl FakeFetcher {
    pub fn with_puma_files() -> Self {
        let mut files = HashMap::new();
        files.insert(
            "bin/restart".to_string(),
            b"#!/bin/sh\nforeman start\n".to_vec(),
        );
        files.insert("Procfile".to_string(), b"web: bundle exec puma\n".to_vec());
        Self { files }
    }
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, remote_path: &str) -> Result<Vec<u8>, OperationError> {
        self.files
            .get(remote_path)
            .cloned()
            .ok_or_else(|| OperationError::fetch(remote_path, "HTTP 404 Not Found"))
    }
}

/// Write the files a fresh `rails new store_front` leaves behind that the
/// recipe edits in place.
pub fn rails_skeleton(root: &Path) {
    let files: &[(&str, &str)] = &[
        ("Gemfile", "source 'https://rubygems.org'\n\ngem 'rails', '4.0.1'\ngem 'sqlite3'\n"),
        ("Rakefile", "require File.expand_path('../config/application', __FILE__)\n\nStoreFront::Application.load_tasks"),
        (".gitignore", "/.bundle\n/log/*.log\n"),
        ("README.rdoc", "== README\n"),
        (
            "app/assets/javascripts/application.js",
            "//= require jquery\n//= require jquery_ujs\n//= require turbolinks\n//= require_tree .\n",
        ),
        (
            "config/application.rb",
            "require File.expand_path('../boot', __FILE__)\n\nrequire 'rails/all'\n\nBundler.require(:default, Rails.env)\n\nmodule StoreFront\n  class Application < Rails::Application\n    # config.i18n.default_locale = :de\n  end\nend\n",
        ),
        (
            "config/routes.rb",
            "StoreFront::Application.routes.draw do\n  # The priority is based upon order of creation.\n  \n  # root 'welcome#index'\nend\n",
        ),
        (
            "config/environments/development.rb",
            "StoreFront::Application.configure do\n  config.assets.debug = true\nend\n",
        ),
        (
            "config/environments/test.rb",
            "StoreFront::Application.configure do\n  config.serve_static_assets  = true\n  config.static_cache_control = \"public, max-age=3600\"\nend\n",
        ),
        (
            "config/initializers/secret_token.rb",
            "StoreFront::Application.config.secret_key_base = '0123abcd'\n",
        ),
        ("config/database.yml", "development:\n  adapter: sqlite3\n"),
        ("test/test_helper.rb", "ENV['RAILS_ENV'] ||= 'test'\n"),
    ];

    for (relative, content) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    fs::create_dir_all(root.join("bin")).unwrap();
}

pub fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("reading {relative}: {e}"))
}
