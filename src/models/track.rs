use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub preview_url: Option<String>, // Absent for many tracks; playback then is a silent no-op
}

impl Track {
    /// First credited artist, as shown on the result row
    pub fn primary_artist(&self) -> &str {
        self.artists
            .first()
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown artist")
    }

    /// Preview clip URL, or an empty string when the catalog has none
    pub fn preview_source(&self) -> &str {
        self.preview_url.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_item_with_extra_fields_parses() {
        let json = r#"{
            "id": "0DiWol3AO6WpXZgp0goxAV",
            "name": "One More Time",
            "artists": [{"name": "Daft Punk", "id": "4tZwfgrHOc3mvqYlEYSvVi"}],
            "preview_url": null,
            "popularity": 80
        }"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.primary_artist(), "Daft Punk");
        assert_eq!(track.preview_source(), "");
    }

    #[test]
    fn missing_artists_fall_back() {
        let track: Track = serde_json::from_str(r#"{"id":"1","name":"Untitled"}"#).unwrap();
        assert_eq!(track.primary_artist(), "Unknown artist");
    }
}
