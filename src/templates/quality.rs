//! Linting, security audit and CI configuration.

pub const RUBOCOP_YML: &str = include_str!("../../templates/rubocop.yml");

pub const RUBOCOP_RAKE: &str = r#"if defined?(Rubocop)
  require 'rubocop/rake_task'
  Rubocop::RakeTask.new do |task|
    task.patterns = ['--rails']
  end
  default_tasks << :rubocop
end

"#;

pub const JSHINTRC: &str = include_str!("../../templates/jshintrc.json");

pub const JSHINTIGNORE: &str = r#"spec/tmp/**/*.js
vendor/**/*.js
coverage/**/*.js
tmp/**/*.js
"#;

pub const JSHINTRB_RAKE: &str = r#"if defined?(Jshintrb)
  require "jshintrb/jshinttask"
  Jshintrb::JshintTask.new :jshint do |t|
    options = JSON.load(File.read('.jshintrc'))
    globals = options.delete('globals')
    ignored = File.read('.jshintignore').split.collect {|pattern| FileList[pattern].to_a }.flatten
    files = Dir.glob('**/*.js')
    t.js_files = files
    t.exclude_js_files = ignored
    t.options = options
    t.globals = globals.keys
  end
  default_tasks << :jshint
end

"#;

pub const BRAKEMAN_RAKE: &str = r#"namespace :brakeman do

  desc "Run Brakeman"
  task :run, :output_files do |t, args|
    files = args[:output_files].split(' ') if args[:output_files]
    puts "Checking for security vulnerabilities..."
    tracker = Brakeman.run :app_path => ".", :output_files => files, :print_report => true
    if tracker.filtered_warnings.any?
      puts "Security vulnerabilities found!"
      exit 1
    end
  end
end

"#;

pub const BUNDLER_AUDIT_RAKE: &str = r#"namespace :bundler do
  desc 'audit Bundler Gemfile for vulnerable gems'
  task :audit do
    puts 'Checking Gemfile for vulnerable gems...'
    require 'English'
    output = `bundle-audit`
    puts output
    success = !!$CHILD_STATUS.to_i
    fail "bunder:audit failed" unless success
  end
end

"#;

pub const BUNDLER_OUTDATED_RAKE: &str = r#"namespace :bundler do
  desc 'Generate report of outdated gems'
  task :outdated do
    puts "Generating report of outdated gems..."
    output = `bundle outdated`
    puts output
  end
end

"#;

pub const TRAVIS_YML: &str = r#"language: ruby
bundler_args: --local --without development vm ct console debug
rvm:
  - ruby-2.0.0-p247
env:
  - BUNDLER_INCLUDE_DEBUG_GROUP=false

branches:
  except:
    - /build-.+-\d{4}-\d{2}-\d{2}-.*/

# create git tag to support quick rollback to last known good state
after_success:
  - git config --global user.email "builds@travis-ci.com"
  - git config --global user.name "Travis CI"
  - git buildtag

"#;

pub const TEST_STATIC_CACHE_CONTROL: &str =
    "config.static_cache_control = 'public, max-age=3600'";

/// Rake line registering `task` as a default task
pub fn default_task(task: &str) -> String {
    format!("default_tasks << {}\n\n", task)
}
