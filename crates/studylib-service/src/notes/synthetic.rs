//! Deterministic stand-in materials for folders whose contents cannot be
//! fetched.

use studylib_entity::folder::Folder;
use studylib_entity::material::{Material, MaterialOrigin, PLACEHOLDER_TIMESTAMP};

/// Tag carried by every synthetic material.
pub const SYNTHETIC_TAG: &str = "synthetic";

const TOPICS: [&str; 3] = ["Overview", "Key concepts", "Practice notes"];

/// Build `count` materials for `folder`. The same folder and count always
/// produce the same records, ids included.
pub fn synthesize(folder: &Folder, count: usize) -> Vec<Material> {
    let stamp = [&folder.updated_at, &folder.created_at]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(String::as_str)
        .unwrap_or(PLACEHOLDER_TIMESTAMP);

    (0..count)
        .map(|i| {
            let topic = TOPICS[i % TOPICS.len()];
            let title = match i / TOPICS.len() {
                0 => format!("{}: {topic}", folder.name),
                round => format!("{}: {topic} ({})", folder.name, round + 1),
            };
            let content = format!(
                "<h2>{title}</h2><p>Notes for <strong>{}</strong> are not available right now. \
                 This placeholder is shown until they can be loaded.</p>",
                folder.name
            );

            Material {
                origin: MaterialOrigin::Synthetic,
                ..Material::new(format!("synthetic-{}-{}", folder.slug, i + 1), title)
                    .with_description(format!("Offline summary of {}", folder.name))
                    .with_content(content)
                    .with_tags([SYNTHETIC_TAG, folder.slug.as_str()])
                    .with_dates(stamp, stamp)
            }
        })
        .collect()
}
