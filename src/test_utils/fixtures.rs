//! Test fixtures for snapshots and registries

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::AssetKind;
use crate::registry::{Item, Registry, RegistryBuilder};

/// Sample snapshot file contents
#[derive(Clone, Debug)]
pub struct SnapshotFixture {
    pub content: String,
    pub file_name: String,
}

impl SnapshotFixture {
    /// A shop page: queued cart and slider scripts pulling in jquery, a
    /// duplicate jquery file, a missing dependency, one stylesheet chain and
    /// one module chain.
    pub fn shop() -> Self {
        Self {
            file_name: "snapshot.json".to_string(),
            content: r#"{
  "generated_at": "2024-05-01 12:00:00",
  "site": "https://example.test/shop/",
  "scripts": {
    "queue": ["shop-cart", "theme-slider"],
    "registered": {
      "jquery": { "src": false, "ver": "3.7.1", "deps": ["jquery-core", "jquery-migrate"], "added_by": "core" },
      "jquery-core": { "src": "/wp-includes/js/jquery/jquery.js?ver=3.7.1", "ver": "3.7.1", "added_by": "core" },
      "jquery-migrate": { "src": "/wp-includes/js/jquery/jquery-migrate.js", "ver": "3.4.1", "added_by": "core" },
      "legacy-jquery": { "src": "/wp-includes/js/jquery/jquery.js?ver=1.12", "added_by": "plugin: legacy" },
      "shop-utils": {
        "src": "https://example.test/wp-content/plugins/shop/utils.js?ver=1.2",
        "deps": ["jquery"],
        "added_by": "plugin: shop"
      },
      "shop-cart": {
        "src": "https://example.test/wp-content/plugins/shop/cart.js",
        "ver": "1.2",
        "deps": ["shop-utils", "wp-hooks"],
        "extra": { "group": 1, "data": "var cartData = {\"items\":[]};" },
        "added_by": "plugin: shop"
      },
      "theme-slider": {
        "src": "/wp-content/themes/aurora/slider.js",
        "deps": ["jquery", "swiper"],
        "added_by": "theme: aurora"
      },
      "wp-hooks": { "src": "/wp-includes/js/dist/hooks.min.js", "added_by": "core" },
      "idle-widget": { "src": "/wp-content/plugins/idle/widget.js", "deps": ["jquery"] }
    }
  },
  "styles": {
    "queue": ["theme-style"],
    "registered": {
      "theme-style": { "src": "/wp-content/themes/aurora/style.css", "deps": ["fonts"], "added_by": "theme: aurora" },
      "fonts": { "src": "https://fonts.example.test/css?family=Inter" },
      "admin-bar": { "src": "/wp-includes/css/admin-bar.css" }
    }
  },
  "modules": {
    "queue": ["@shop/app"],
    "registered": {
      "@shop/app": { "src": "/wp-content/plugins/shop/app.js", "deps": ["@wordpress/interactivity"] },
      "@wordpress/interactivity": { "src": "/wp-includes/js/dist/interactivity.js" }
    }
  }
}
"#
            .to_string(),
        }
    }

    /// Two stylesheets depending on each other.
    pub fn cycle() -> Self {
        Self {
            file_name: "cycle.yaml".to_string(),
            content: r#"
styles:
  queue: [a]
  registered:
    a: { src: /a.css, deps: [b] }
    b: { src: /b.css, deps: [a] }
"#
            .trim_start()
            .to_string(),
        }
    }

    /// Script chain in TOML form.
    pub fn toml_chain() -> Self {
        Self {
            file_name: "snapshot.toml".to_string(),
            content: r#"
[scripts]
queue = ["C"]

[scripts.registered.A]
src = "/a.js"

[scripts.registered.B]
src = "/b.js"
deps = ["A"]

[scripts.registered.C]
src = "/c.js"
deps = ["B"]
"#
            .trim_start()
            .to_string(),
        }
    }

    /// JSON that does not parse.
    pub fn invalid_syntax() -> Self {
        Self {
            file_name: "broken.json".to_string(),
            content: r#"{ "scripts": { "queue": ["a"], "registered": "#.to_string(),
        }
    }

    /// Write the fixture into `dir` and return its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Builder for in-memory registries
#[derive(Debug)]
pub struct RegistryFixture {
    builder: RegistryBuilder,
}

impl RegistryFixture {
    /// Empty fixture for `kind`.
    pub fn new(kind: AssetKind) -> Self {
        Self {
            builder: RegistryBuilder::new(kind),
        }
    }

    /// Register `name` with source `/<name>.js` and the given dependencies.
    #[must_use]
    pub fn item(mut self, name: &str, deps: &[&str]) -> Self {
        self.builder.register(name, Item::new(format!("/{name}.js")).with_deps(deps.iter().copied()), None);
        self
    }

    /// Register a fully specified item.
    #[must_use]
    pub fn with(mut self, name: &str, item: Item, added_by: Option<&str>) -> Self {
        self.builder.register(name, item, added_by);
        self
    }

    /// Enqueue `names` in order.
    #[must_use]
    pub fn queue(mut self, names: &[&str]) -> Self {
        for name in names {
            self.builder.enqueue(*name);
        }
        self
    }

    /// Finish the registry.
    pub fn build(self) -> Registry {
        self.builder.build()
    }

    /// The `C -> B -> A` chain with `C` queued.
    pub fn chain() -> Registry {
        Self::new(AssetKind::Script).item("A", &[]).item("B", &["A"]).item("C", &["B"]).queue(&["C"]).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Snapshot;
    use crate::registry::snapshot::SnapshotFormat;

    #[test]
    fn test_snapshot_fixtures_parse() {
        for fixture in [SnapshotFixture::shop(), SnapshotFixture::cycle(), SnapshotFixture::toml_chain()] {
            let format = SnapshotFormat::from_path(Path::new(&fixture.file_name));
            assert!(Snapshot::parse(&fixture.content, format).is_ok(), "{} should parse", fixture.file_name);
        }
        let broken = SnapshotFixture::invalid_syntax();
        assert!(Snapshot::parse(&broken.content, SnapshotFormat::Json).is_err());
    }

    #[test]
    fn test_registry_fixture_chain() {
        let registry = RegistryFixture::chain();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.queue(), ["C"]);
        assert_eq!(registry.dependencies_of("B"), ["A"]);
    }
}
