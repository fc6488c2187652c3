//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# PSP Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# Read once at startup.

[windows]
# margin = 10            # 0-200, gap between anchored windows and the screen edge

[windows.psp]
width = 450              # 50-4000
height = 600             # 50-4000

[windows.qss]
width = 1030             # maximum; shrinks on narrow screens
height = 95

# [windows.qss_widget]
# width = 300
# height = 360

# [windows.tooltip]
# width = 200
# height = 60

# [windows.survey]
# width = 800
# height = 600

[logging]
# level = "info"         # trace, debug, info, warn, error
# to_file = true         # psp-<startup timestamp>.log
# directory = "/path/to/logs"

[diagnostics]
# enabled = false
# preferences_url = "http://localhost:8081/preferences"
# timeout_secs = 10      # 1-120

# The settings catalog defaults to the built-in one. Defining any
# [[settings.catalog]] entry replaces it entirely, for example:
#
# [[settings.catalog]]
# id = "volume"
# label = "Volume"
# default = 50
# kind = { type = "number", min = 0, max = 100, step = 5 }
#
# [[settings.catalog]]
# id = "language"
# label = "Language"
# default = "en-US"
# requires_restart = true
# kind = { type = "choice", options = ["en-US", "ko-KR"] }
"##
    .to_string()
}
