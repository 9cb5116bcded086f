use serde_json::json;
use smooth::{Dimensions, ManifestDigest, Md5Digest, Resolution, StreamType};

use super::{parse, MANIFEST_URL};
use crate::AssertWrapper;

const MANIFEST: &str = include_str!("../fixtures/ism/720p_h264_aac.ism");
const ROOT: &str =
    "http://playready.directtaps.net/smoothstreaming/TTLSS720VC1/To_The_Limit_720.ism";

#[test]
fn playlists_follow_manifest_order() -> anyhow::Result<()> {
    let result = parse(MANIFEST)?;

    assert_eq!(result.url, MANIFEST_URL);
    assert_eq!(
        result
            .playlists
            .iter()
            .map(|p| (p.r#type, p.bitrate))
            .collect::<Vec<_>>(),
        vec![
            (StreamType::Video, 2962000),
            (StreamType::Video, 2056000),
            (StreamType::Video, 1427000),
            (StreamType::Video, 991000),
            (StreamType::Audio, 128000),
        ]
    );

    Ok(())
}

#[test]
fn video_segments() -> anyhow::Result<()> {
    let result = parse(MANIFEST)?;

    // <c t="0" d="20020000" r="60" /> followed by <c d="9676333" />
    let expected = (0..=60u64)
        .map(|k| {
            format!(
                "{ROOT}/QualityLevels(2962000)/Fragments(video={})",
                k * 20020000
            )
        })
        .collect::<Vec<_>>();

    let playlist = &result.playlists[0];
    assert_eq!(playlist.segments, expected);
    assert_eq!(
        playlist.segments.last().map(String::as_str),
        Some(format!("{ROOT}/QualityLevels(2962000)/Fragments(video=1201200000)").as_str())
    );

    for playlist in result.playlists.iter().filter(|p| p.r#type == StreamType::Video) {
        assert_eq!(playlist.segments.len(), 61);
        assert_eq!(
            playlist.segments[1],
            format!(
                "{ROOT}/QualityLevels({})/Fragments(video=20020000)",
                playlist.bitrate
            )
        );
    }

    Ok(())
}

#[test]
fn audio_segments() -> anyhow::Result<()> {
    let result = parse(MANIFEST)?;

    let audio = result
        .playlists
        .iter()
        .find(|p| p.r#type == StreamType::Audio)
        .assert_success();

    assert_eq!(audio.segments.len(), 60);
    assert_eq!(
        audio.segments[0],
        format!("{ROOT}/QualityLevels(128000)/Fragments(audio=0)")
    );
    assert_eq!(
        audio.segments[59],
        format!("{ROOT}/QualityLevels(128000)/Fragments(audio=1191880240)")
    );

    Ok(())
}

#[test]
fn resolutions() -> anyhow::Result<()> {
    let result = parse(MANIFEST)?;

    let resolutions = result
        .playlists
        .iter()
        .map(|p| p.resolution.clone())
        .collect::<Vec<_>>();
    let dimensions = |width, height| {
        Resolution::Dimensions(Dimensions {
            width: Some(width),
            height: Some(height),
        })
    };

    assert_eq!(
        resolutions,
        vec![
            dimensions(1280, 720),
            dimensions(992, 560),
            dimensions(768, 432),
            dimensions(592, 332),
            Resolution::NotApplicable,
        ]
    );

    for playlist in &result.playlists {
        assert_eq!(
            playlist.resolution == Resolution::NotApplicable,
            playlist.r#type == StreamType::Audio
        );
    }

    Ok(())
}

#[test]
fn manifest_hash() -> anyhow::Result<()> {
    let result = parse(MANIFEST)?;

    assert_eq!(result.manifest_hash, Md5Digest.digest(MANIFEST)?);
    assert_eq!(result.manifest_hash.len(), 32);
    assert!(result
        .manifest_hash
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));

    Ok(())
}

#[test]
fn serialized_shape() -> anyhow::Result<()> {
    let result = parse(MANIFEST)?;
    let value = serde_json::to_value(&result)?;

    assert_eq!(value["url"], json!(MANIFEST_URL));
    assert_eq!(value["manifestHash"], json!(result.manifest_hash));
    assert_eq!(value["playlists"].as_array().map(Vec::len), Some(5));
    assert_eq!(value["playlists"][0]["type"], json!("video"));
    assert_eq!(
        value["playlists"][0]["resolution"],
        json!({ "width": 1280, "height": 720 })
    );
    assert_eq!(value["playlists"][4]["type"], json!("audio"));
    assert_eq!(value["playlists"][4]["resolution"], json!("n/a"));
    assert_eq!(value["playlists"][4]["bitrate"], json!(128000));

    Ok(())
}
