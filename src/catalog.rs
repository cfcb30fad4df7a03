/*
Stagelight - by David Petnick
*/
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::options::{LoadError, config_path, read_ron};

pub const CATALOG_FILE: &str = "catalog.ron";
pub const CATALOG_ENV: &str = "STAGELIGHT_CATALOG";

pub const LANDING_BG_PATH: &str = "ground/landing.png";
pub const GALLERY_BG_PATH: &str = "ground/gallery.jpg";
pub const GALLERY_MUSIC_PATH: &str = "ground/audio.mp3";

/// One Accordion Panel. Order in the Catalog is Display Order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
}

impl GalleryImage {
    /// Decorative Panel Number ("1" -> "01", "12" -> "12")
    pub fn badge(&self) -> String {
        format!("{:0>2}", self.id)
    }
}

/// Load-Once Image List + Scene Media Paths
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub landing_background: String,
    pub gallery_background: String,
    pub music: String,
    pub images: Vec<GalleryImage>,
}

fn entry(id: &str, url: &str, title: &str, description: &str) -> GalleryImage {
    GalleryImage {
        id: id.into(),
        url: url.into(),
        title: title.into(),
        description: description.into(),
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            landing_background: LANDING_BG_PATH.into(),
            gallery_background: GALLERY_BG_PATH.into(),
            music: GALLERY_MUSIC_PATH.into(),
            images: vec![
                entry("1", "photo/7be8515f1cba396241381868f0863a7e.png", "深情黄子", "沉浸在音乐世界里的黄子，每一个音符都是他的心跳。"),
                entry("2", "photo/0c98be38438f900234070a09bf5cfddb.jpg", "唯美黄子", "白纱下的黄子，如梦似幻，纯净而美好。"),
                entry("3", "photo/4bc956709e4b2ad97f953e4e8f2fb977.jpg", "闪耀黄子", "舞台上的黄子，比星光更加璀璨夺目。"),
                entry("4", "photo/f0cd9b092393244c3cb6a38ba9bd818c.jpg", "谢幕黄子", "黄子用歌声诉说着故事，感动了在场的每一个人。"),
                entry("5", "photo/29e7726666172929a6c69da215bf2e96.jpg", "天使黄子", "仿佛落入凡间的天使，黄子散发着温柔的光芒。"),
                entry("6", "photo/5e0d432f9b3429874daa93d502a03201.jpg", "魅力黄子", "举手投足间，黄子释放着无限的舞台魅力。"),
                entry("7", "photo/083bd09d08f13e98dd2c1c5727a4ed6c.jpg", "梦幻黄子", "流动的光影中，黄子是那个最不真实的梦。"),
                entry("8", "photo/1167f296a8209343d5f32d35a8818b47.png", "可爱黄子", "被玩偶环绕的黄子，充满了童真与快乐。"),
                entry("9", "photo/a02529e4298dde44954f88e5edc4fb93.jpg", "黄子黄子", "黄子的帅气。"),
                entry("10", "photo/b847193b65cf81ae969ed593e5d3b1f4.jpg", "谢幕黄子", "完美的演出，属于黄子和我们的珍贵回忆。"),
            ],
        }
    }
}

impl Catalog {
    /// Resolve + Read the Catalog File, Falling Back to the Built-In List
    /// A Missing File is Normal; a Broken One Gets a Warning
    pub fn load() -> Self {
        let Some(path) = config_path(CATALOG_FILE, CATALOG_ENV) else {
            return Self::default();
        };
        if !path.exists() {
            info!("no {} at {}, using built-in catalog", CATALOG_FILE, path.display());
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(catalog) => {
                info!("catalog loaded from {} ({} images)", path.display(), catalog.images.len());
                catalog
            }
            Err(err) => {
                warn!("{err}; using built-in catalog");
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        read_ron::<Self>(path).map(Self::validated)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, LoadError> {
        ron::from_str::<Self>(contents)
            .map(Self::validated)
            .map_err(|err| LoadError::Parse {
                path: "<inline>".into(),
                message: err.to_string(),
            })
    }

    /// Enforce Non-Empty + Unique Ids, Keeping First Occurrence
    pub fn validated(mut self) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        self.images.retain(|img| {
            if img.id.trim().is_empty() {
                warn!("dropping catalog entry '{}' with empty id", img.title);
                return false;
            }
            if !seen.insert(img.id.clone()) {
                warn!("dropping duplicate catalog id '{}'", img.id);
                return false;
            }
            true
        });
        self
    }

    pub fn first_id(&self) -> Option<&str> {
        self.images.first().map(|img| img.id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_ordered_and_unique() {
        let c = Catalog::default();
        assert_eq!(c.images.len(), 10);
        assert_eq!(c.first_id(), Some("1"));
        let validated = c.clone().validated();
        assert_eq!(validated, c);
    }

    #[test]
    fn badge_pads_to_two_digits() {
        let c = Catalog::default();
        assert_eq!(c.images[0].badge(), "01");
        assert_eq!(c.images[9].badge(), "10");
    }

    #[test]
    fn validation_drops_empty_and_duplicate_ids() {
        let c = Catalog {
            images: vec![
                entry("a", "a.png", "A", ""),
                entry("", "x.png", "X", ""),
                entry("b", "b.png", "B", ""),
                entry("a", "a2.png", "A again", ""),
            ],
            ..Catalog::default()
        }
        .validated();

        let ids: Vec<&str> = c.images.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(c.images[0].url, "a.png");
    }

    #[test]
    fn parses_partial_ron_with_defaults() {
        let src = r#"(
            images: [
                (id: "x", url: "photo/x.png", title: "X", description: "first"),
                (id: "y", url: "photo/y.png", title: "Y", description: "second"),
            ],
        )"#;
        let c = Catalog::from_ron_str(src).expect("catalog should parse");
        assert_eq!(c.first_id(), Some("x"));
        assert_eq!(c.images.len(), 2);
        assert_eq!(c.music, GALLERY_MUSIC_PATH);
    }

    #[test]
    fn empty_image_list_is_allowed() {
        let c = Catalog::from_ron_str("(images: [])").expect("empty catalog should parse");
        assert!(c.is_empty());
        assert_eq!(c.first_id(), None);
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let err = Catalog::from_ron_str("(images: [ (id: ").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
