use smooth::{Dimensions, ManifestError, Resolution, SmoothError, StreamType, XmlError};

use super::parse;
use crate::AssertWrapper;

const MANIFEST: &str = include_str!("../fixtures/ism/live_discontinuity.ism");

fn fragment_times(segments: &[String]) -> Vec<u64> {
    segments
        .iter()
        .map(|segment| {
            let (_, time) = segment.rsplit_once('=').assert_success();
            time.trim_end_matches(')').parse::<u64>().assert_success()
        })
        .collect()
}

#[test]
fn start_times_only_move_forward() -> anyhow::Result<()> {
    let result = parse(MANIFEST)?;
    assert_eq!(result.playlists.len(), 2);

    let video = &result.playlists[0];
    assert_eq!(video.r#type, StreamType::Video);

    let times = fragment_times(&video.segments);
    assert_eq!(
        times,
        vec![
            2000000000, 2020000000, 2040000000,
            // t="2040000000" is behind the cursor and ignored
            2060000000,
            // t="3000000000" jumps forward
            3000000000, 3020000000, 3040000000,
        ]
    );
    assert!(times.windows(2).all(|w| w[0] <= w[1]));

    Ok(())
}

#[test]
fn text_stream() -> anyhow::Result<()> {
    let result = parse(MANIFEST)?;

    let text = &result.playlists[1];
    assert_eq!(text.r#type, StreamType::Text);
    assert_eq!(text.bitrate, 1000);
    assert_eq!(
        text.resolution,
        Resolution::Dimensions(Dimensions {
            width: None,
            height: None
        })
    );
    assert_eq!(
        text.segments,
        vec![format!(
            "{}/QualityLevels(1000)/Fragments(textstream=2000000000)",
            super::MANIFEST_URL.rsplit_once('/').assert_success().0
        )]
    );

    Ok(())
}

fn invalid_manifest(manifest: &str) -> ManifestError {
    match parse(manifest) {
        Err(SmoothError::InvalidManifest(error)) => error,
        other => panic!("expected an invalid manifest, got {other:?}"),
    }
}

#[test]
fn missing_stream_index() {
    assert_eq!(
        invalid_manifest(r#"<SmoothStreamingMedia MajorVersion="2" />"#),
        ManifestError::MissingField {
            field: "StreamIndex",
            parent: "SmoothStreamingMedia"
        }
    );
    assert_eq!(
        invalid_manifest(r#"<Manifest><StreamIndex Type="video" /></Manifest>"#),
        ManifestError::MissingField {
            field: "SmoothStreamingMedia",
            parent: "document"
        }
    );
}

#[test]
fn malformed_records() {
    assert_eq!(
        invalid_manifest(
            r#"<SmoothStreamingMedia>
                 <StreamIndex Type="video" Url="{bitrate}/{start time}">
                   <QualityLevel Bitrate="1" />
                   <c t="0" />
                 </StreamIndex>
               </SmoothStreamingMedia>"#
        ),
        ManifestError::MissingField {
            field: "d",
            parent: "c"
        }
    );

    assert_eq!(
        invalid_manifest(
            r#"<SmoothStreamingMedia>
                 <StreamIndex Type="video" Url="{bitrate}/{start time}">
                   <QualityLevel Bitrate="high" />
                   <c d="1" />
                 </StreamIndex>
               </SmoothStreamingMedia>"#
        ),
        ManifestError::InvalidNumber {
            field: "Bitrate",
            value: "\"high\"".to_string()
        }
    );

    assert_eq!(
        invalid_manifest(
            r#"<SmoothStreamingMedia>
                 <StreamIndex Type="closed-captions" Url="{bitrate}/{start time}">
                   <QualityLevel Bitrate="1" />
                 </StreamIndex>
               </SmoothStreamingMedia>"#
        ),
        ManifestError::UnknownStreamType("closed-captions".to_string())
    );
}

#[test]
fn not_xml() {
    match parse("#EXTM3U") {
        Err(SmoothError::Dependency(error)) => {
            assert!(matches!(error.downcast_ref::<XmlError>(), Some(XmlError::NotXml)))
        }
        other => panic!("expected a dependency error, got {other:?}"),
    }
}
