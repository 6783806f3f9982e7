//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sitemap.toml`:
//!
//! | Module    | TOML Section | Purpose                               |
//! |-----------|--------------|---------------------------------------|
//! | `site`    | `[site]`     | Base URL of the published site        |
//! | `sitemap` | `[sitemap]`  | File names, limits, gzip, output dir  |
//! | `robots`  | `[robots]`   | `robots.txt` update                   |
//! | `submit`  | `[submit]`   | Search engine ping                    |

mod robots;
mod site;
mod sitemap;
mod submit;

pub use robots::RobotsConfig;
pub use site::SiteConfig;
pub use sitemap::SitemapConfig;
pub use submit::SubmitConfig;
