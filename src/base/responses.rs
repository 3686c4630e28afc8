//! Static reply texts.

/// Reply for a mention without a recognized command.
pub const DEFAULT_RESPONSE: &str = "_No 'user', 'serial' or 'asset' argument specified. Type '@snipe-it help' to learn how to use this bot._";

/// Usage text for the `help` command.
pub const HELP_RESPONSE: &str = "*Usage:*
*user*          _username (ex. jcuriano)_                      -- print asset information for a user
*serial*        _serial number (ex. C02XXXXXXXXX)_  -- print asset information about a serial
*asset*         _asset tag (ex. 010101)_                      -- print information about an asset tag";
