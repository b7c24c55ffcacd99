pub const APP_NAME: &str = "modbox";

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "box.yml";

/// Directory created inside each module for configure/build output.
pub const BUILD_DIR: &str = "build";

/// Token replaced with [`SRCDIR_VALUE`] in every command before it runs.
pub const SRCDIR_TOKEN: &str = "${srcdir}";

/// The module source directory as seen from its build directory.
pub const SRCDIR_VALUE: &str = "..";

/// Where systemd-nspawn keeps machine root filesystems.
pub const DEFAULT_MACHINES_DIR: &str = "/var/lib/machines";

/// Mount point of the project directory inside the machine.
pub const DEFAULT_MOUNT_POINT: &str = "/workspace";

pub const DEFAULT_SHELL: &str = "/bin/sh";

pub const DEFAULT_PACKAGE_MANAGER: &str = "pacman -S --needed --noconfirm";

/// Wraps test commands so they get a virtual X display.
pub const DEFAULT_TEST_PREFIX: &str = r#"xvfb-run -a -s "-screen 0 800x600x24""#;

/// Environment variable overriding `settings.machines_dir`.
pub const MACHINES_DIR_ENV: &str = "MODBOX_MACHINES_DIR";
