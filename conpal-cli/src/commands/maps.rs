use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::conpal::Conpal;
use conpal_core::directory::LinkFragment;
use conpal_core::store::RecordStore;

use crate::commands::load_schedule;

pub fn run(conpal: &Conpal) -> Result<()> {
    let store = load_schedule(conpal)?;

    let maps: Vec<_> = store.maps().iter().filter(|map| map.is_browseable).collect();

    if maps.is_empty() {
        println!("{}", "No browseable maps in the cached schedule".dimmed());
        return Ok(());
    }

    for map in maps {
        println!(
            "{} {}",
            map.description.bold(),
            format!("({} entries)", map.entries.len()).dimmed()
        );

        for entry in &map.entries {
            for link in &entry.links {
                if let Some(label) = link_label(link, &store) {
                    println!("  {}", label);
                }
            }
        }
    }

    Ok(())
}

/// Human label for a map link; `None` for links that cannot render (unknown
/// kinds, dangling dealer references).
fn link_label(link: &LinkFragment, store: &RecordStore) -> Option<String> {
    match link {
        LinkFragment::DealerDetail { target } => store
            .dealer(target)
            .map(|dealer| format!("dealer: {}", dealer.full_name())),
        LinkFragment::WebExternal { name, target } => {
            let label = name.clone().unwrap_or_else(|| sanitized(target));
            Some(format!("web: {}", label))
        }
        LinkFragment::MapEntry { name, target } => {
            Some(format!("map: {}", name.as_deref().unwrap_or(target)))
        }
        LinkFragment::EventConferenceRoom { name, target } => {
            let label = name
                .clone()
                .or_else(|| store.room(target).map(|room| room.name.clone()))
                .unwrap_or_else(|| target.clone());
            Some(format!("room: {}", label))
        }
        LinkFragment::Unknown => None,
    }
}

/// Strip scheme, leading www and trailing slash for display.
fn sanitized(url: &str) -> String {
    let lower = url.to_lowercase();
    let no_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let no_www = no_scheme.strip_prefix("www.").unwrap_or(no_scheme);
    no_www.strip_suffix('/').unwrap_or(no_www).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use conpal_core::directory::Dealer;
    use conpal_core::store::Snapshot;

    #[test]
    fn test_sanitized_url() {
        assert_eq!(sanitized("https://www.example.com/"), "example.com");
        assert_eq!(sanitized("http://shop.example.com/page"), "shop.example.com/page");
        assert_eq!(sanitized("example.com"), "example.com");
    }

    #[test]
    fn test_link_labels() {
        let store = RecordStore::from_snapshot(Snapshot {
            dealers: vec![Dealer {
                id: "d1".to_string(),
                display_name: Some("Ink & Paw".to_string()),
                attendee_nickname: "inkpaw".to_string(),
                short_description: None,
                artist_image_id: None,
            }],
            ..Default::default()
        });

        let dealer = LinkFragment::DealerDetail {
            target: "d1".to_string(),
        };
        assert_eq!(link_label(&dealer, &store).unwrap(), "dealer: Ink & Paw");

        // Dangling dealer references render nothing
        let dangling = LinkFragment::DealerDetail {
            target: "nope".to_string(),
        };
        assert!(link_label(&dangling, &store).is_none());

        let web = LinkFragment::WebExternal {
            name: None,
            target: "https://www.example.com/".to_string(),
        };
        assert_eq!(link_label(&web, &store).unwrap(), "web: example.com");

        assert!(link_label(&LinkFragment::Unknown, &store).is_none());
    }
}
