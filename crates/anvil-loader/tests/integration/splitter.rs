use anvil_loader::splitter::{split_documents, DocumentReader, DocumentSplitter, Separator, Split};
use proptest::prelude::*;

/// Feeds `data` to a splitter cut at the given (unsorted, possibly repeated) offsets.
fn split_at_offsets(data: &[u8], offsets: &[usize]) -> Vec<Vec<u8>> {
    let mut cuts: Vec<usize> = offsets.iter().map(|o| o % (data.len() + 1)).collect();
    cuts.push(0);
    cuts.push(data.len());
    cuts.sort_unstable();

    let mut splitter = DocumentSplitter::new();
    let mut out = Vec::new();
    for window in cuts.windows(2) {
        splitter.push(&data[window[0]..window[1]]).unwrap();
        while let Split::Document(doc) = splitter.next_document() {
            out.push(doc);
        }
    }
    splitter.finish();
    while let Split::Document(doc) = splitter.next_document() {
        out.push(doc);
    }
    assert_eq!(splitter.next_document(), Split::End);
    out
}

fn whole(data: &[u8]) -> Vec<Vec<u8>> {
    split_documents(data).map(<[u8]>::to_vec).collect()
}

// Bytes drawn from a tiny alphabet so that separators show up often.
fn separator_heavy_input() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop::sample::select(vec![b'\n', b'-', b'a', b' ']), 0..200)
}

// Segments that can never contain or complete a separator.
fn segment() -> impl Strategy<Value = String> {
    "[a-z: \n]{0,24}"
}

proptest! {
    #[test]
    fn prop_chunking_preserves_documents(
        data in separator_heavy_input(),
        offsets in proptest::collection::vec(any::<usize>(), 0..12),
    ) {
        prop_assert_eq!(split_at_offsets(&data, &offsets), whole(&data));
    }

    #[test]
    fn prop_reader_matches_whole_buffer(
        data in separator_heavy_input(),
        read_size in 1usize..9,
    ) {
        let reader = DocumentReader::with_separator(&data[..], Separator::default(), read_size);
        let streamed: Vec<Vec<u8>> = reader.collect::<std::io::Result<_>>().unwrap();
        prop_assert_eq!(streamed, whole(&data));
    }

    #[test]
    fn prop_no_separator_yields_whole_input(data in "[a-z: \n]{0,64}") {
        let docs = whole(data.as_bytes());
        if data.is_empty() {
            prop_assert!(docs.is_empty());
        } else {
            prop_assert_eq!(docs, vec![data.into_bytes()]);
        }
    }

    #[test]
    fn prop_separated_segments_come_back(segments in proptest::collection::vec(segment(), 1..8)) {
        let joined = segments.join("\n---\n");
        let mut expected: Vec<Vec<u8>> = segments.iter().map(|s| s.clone().into_bytes()).collect();
        // Nothing follows the last separator: no final document.
        if expected.last().is_some_and(|last| last.is_empty()) {
            expected.pop();
        }
        prop_assert_eq!(whole(joined.as_bytes()), expected);
    }

    #[test]
    fn prop_bytes_are_accounted_for(data in separator_heavy_input()) {
        let documents = whole(&data);
        let emitted: usize = documents.iter().map(Vec::len).sum();
        // Every document but the last is followed by a full separator.
        prop_assert!(emitted + documents.len().saturating_sub(1) * 4 <= data.len());
    }
}

#[test]
fn test_trailing_separator_without_newline() {
    let segments = ["kind: A", "kind: B"];
    let data = format!("{}\n---", segments.join("\n---\n"));
    assert_eq!(
        whole(data.as_bytes()),
        vec![b"kind: A".to_vec(), b"kind: B".to_vec()]
    );
}
