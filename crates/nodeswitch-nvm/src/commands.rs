//! Every shell command nvm is driven with, per platform.

use nodeswitch_platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub posix: &'static str,
    pub windows: &'static str,
}

impl CommandSpec {
    #[must_use]
    pub const fn resolve(&self, platform: Platform) -> &'static str {
        match platform {
            Platform::Windows => self.windows,
            Platform::MacOs | Platform::Linux => self.posix,
        }
    }

    /// Resolve for `platform` and append a single argument. Callers must
    /// have validated `argument` already; it is not quoted.
    #[must_use]
    pub fn with_argument(&self, platform: Platform, argument: &str) -> String {
        format!("{} {argument}", self.resolve(platform))
    }
}

pub const MANAGER_VERSION: CommandSpec = CommandSpec {
    name: "manager-version",
    posix: "nvm --version",
    windows: "nvm --version",
};

pub const RUNTIME_VERSION: CommandSpec = CommandSpec {
    name: "runtime-version",
    posix: "node -v",
    windows: "node -v",
};

// Plain `nvm ls` also prints alias lines such as `lts/iron -> v20.11.0 (-> N/A)`
// for versions that are not installed.
pub const LIST_INSTALLED: CommandSpec = CommandSpec {
    name: "list-installed",
    posix: "nvm ls --no-alias",
    windows: "nvm list",
};

pub const USE_VERSION: CommandSpec = CommandSpec {
    name: "use-version",
    posix: "nvm use",
    windows: "nvm use",
};

pub const INSTALL_VERSION: CommandSpec = CommandSpec {
    name: "install-version",
    posix: "nvm install",
    windows: "nvm install",
};

/// nvm-windows has no default alias; `use` there switches the global symlink.
pub const SET_DEFAULT: CommandSpec = CommandSpec {
    name: "set-default",
    posix: "nvm alias default",
    windows: "nvm use",
};

pub const BOOTSTRAP: CommandSpec = CommandSpec {
    name: "bootstrap",
    posix: "curl -o- https://raw.githubusercontent.com/nvm-sh/nvm/v0.39.7/install.sh | bash",
    windows: "$installer = Join-Path $env:TEMP 'nvm-install.ps1'; \
              Invoke-WebRequest -UseBasicParsing \
              -Uri https://raw.githubusercontent.com/coreybutler/nvm-windows/master/install.ps1 \
              -OutFile $installer; \
              Set-ExecutionPolicy -Scope Process -ExecutionPolicy Bypass -Force; \
              & $installer",
};
