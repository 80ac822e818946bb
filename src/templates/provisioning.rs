//! Vagrant virtual machine and chef-solo provisioning files.

pub const VAGRANTFILE: &str = include_str!("../../templates/Vagrantfile");

pub const VAGRANT_GITIGNORE: &str = r#"# vagrant files
boxes/*
.vagrant
"#;

pub const BERKSFILE: &str = include_str!("../../templates/Berksfile");

pub const CHEF_NODE_JSON: &str = include_str!("../../templates/chef_node.json");

/// Shell provisioner run inside the VM after chef
pub const VM_RAILS_SETUP: &str = include_str!("../../templates/vm_rails_setup.sh");

/// Files fetched from the template repository rather than embedded
pub const REMOTE_RESTART_SCRIPT: &str = "bin/restart";
pub const REMOTE_PROCFILE: &str = "Procfile";
