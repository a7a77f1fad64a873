/// End-to-end tests of the track list: loading, filtering, sorting, selection and delete
mod common;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use common::{LibraryDir, TrackBuilder, sample_tracks};
use futures::FutureExt;
use futures::executor::block_on;
use futures::future::BoxFuture;
use track_browser::models::Entry;
use track_browser::{
    Action, Collaborators, Dispatch, Facet, Key, Modifiers, SkipDirection, SortKey, SortRequest,
    Track, TrackBrowser, TrackField, TrackList, load_library,
};

fn names(list: &TrackList) -> Vec<String> {
    list.display_tracks().iter().map(|t| t.name.clone().unwrap_or_default()).collect()
}

fn labels(list: &TrackList, facet: Facet) -> Vec<String> {
    list.facet_options(facet).iter().map(|o| o.label.clone()).collect()
}

fn assert_invariants(list: &TrackList, track_count: usize) {
    assert_eq!(list.len(), track_count);
    for (position, entry) in list.entries().iter().enumerate() {
        assert_eq!(entry.display_index, position);
        assert_eq!(entry.is_visible(), entry.filter_mask.is_empty());
    }
    assert_eq!(list.display_tracks().len(), list.visible_entries().count());
}

#[test]
fn test_invariants_hold_across_actions() {
    let tracks = sample_tracks();
    let count = tracks.len();
    let actions = vec![
        Action::ApplyFacet { facet: Facet::Genre, values: vec!["Rock".into()] },
        Action::search("t"),
        Action::Sort(SortRequest::toggle(SortKey::Field(TrackField::Name))),
        Action::ClickRow { position: 0, modifiers: Modifiers::NONE },
        Action::Sort(SortRequest::toggle(SortKey::Field(TrackField::Name))),
        Action::ApplyFacet { facet: Facet::Genre, values: vec![] },
        Action::KeyPress { key: Key::Char('a'), modifiers: Modifiers::META },
        Action::Sort(SortRequest::toggle(SortKey::Original)),
    ];

    let mut list = TrackList::new(tracks);
    assert_invariants(&list, count);
    for action in actions {
        list = list.reduce(action).state;
        assert_invariants(&list, count);
    }
}

#[test]
fn test_facets_narrow_each_other_but_not_themselves() {
    let list = TrackList::new(sample_tracks());
    assert_eq!(
        labels(&list, Facet::Artist),
        vec!["All (3 Artists)", "Miles Davis", "Pink Floyd", "Rush"]
    );

    let list = list
        .reduce(Action::ApplyFacet { facet: Facet::Artist, values: vec!["pink floyd".into()] })
        .state;
    assert_eq!(labels(&list, Facet::Album), vec!["All (1 Album)", "The Dark Side of the Moon"]);
    assert_eq!(labels(&list, Facet::Genre), vec!["All (1 Genre)", "Rock"]);
    // still lists every artist
    assert_eq!(labels(&list, Facet::Artist).len(), 4);
    assert!(list.facet_options(Facet::Artist)[2].selected);
}

#[test]
fn test_search_narrows_every_option_list() {
    let list = TrackList::new(sample_tracks()).reduce(Action::search("blue")).state;
    assert_eq!(names(&list), vec!["So What", "Blue in Green"]);
    assert_eq!(labels(&list, Facet::Genre), vec!["All (1 Genre)", "Jazz"]);
}

#[test]
fn test_selection_ignores_hidden_rows() {
    let list = TrackList::new(sample_tracks());
    let list = list.reduce(Action::KeyPress { key: Key::Char('a'), modifiers: Modifiers::META });
    let list = list
        .state
        .reduce(Action::ApplyFacet { facet: Facet::Genre, values: vec!["jazz".into()] })
        .state;

    // hidden rows keep their flag but are not reported
    assert_eq!(list.entries().iter().filter(|e| e.selected).count(), 5);
    let selected: Vec<&str> =
        list.selected().iter().filter_map(|e| e.track.name.as_deref()).collect();
    assert_eq!(selected, vec!["So What", "Blue in Green"]);

    let reduced = list.reduce(Action::KeyPress { key: Key::Enter, modifiers: Modifiers::NONE });
    match reduced.effect {
        Some(track_browser::Effect::Play { rows, start: 0 }) => assert_eq!(rows.len(), 2),
        other => panic!("expected play, got {other:?}"),
    }
}

#[test]
fn test_natural_sort_on_titles() {
    let tracks = ["3", "The Beatles", "2112", "Abbey"]
        .iter()
        .enumerate()
        .map(|(i, name)| TrackBuilder::new(&i.to_string()).name(name).build())
        .collect();
    let list = TrackList::new(tracks).reduce(Action::Sort("name".parse().unwrap())).state;
    assert_eq!(names(&list), vec!["Abbey", "The Beatles", "2112", "3"]);
}

#[test]
fn test_sort_by_number_then_toggle() {
    let list = TrackList::new(sample_tracks()).reduce(Action::Sort("+year".parse().unwrap())).state;
    assert_eq!(names(&list), vec!["So What", "Blue in Green", "Money", "Time", "Tom Sawyer"]);

    let list = list.reduce(Action::Sort("year".parse().unwrap())).state;
    assert_eq!(names(&list), vec!["Tom Sawyer", "Time", "Money", "Blue in Green", "So What"]);
    assert_eq!(list.sort_state().to_string(), "-year");
}

#[test]
fn test_loaded_library_feeds_the_list() {
    let dir = LibraryDir::new();
    let path = dir.with_json_lines("library.jsonl", &sample_tracks());

    let list = TrackList::new(load_library(&path).unwrap());
    assert_eq!(list.len(), 5);
    assert_eq!(labels(&list, Facet::Genre), vec!["All (2 Genres)", "Jazz", "Rock"]);
}

/// In-memory library shared between the test and the browser's collaborators
#[derive(Default)]
struct Library {
    tracks: Mutex<Vec<Track>>,
    played: Mutex<Vec<String>>,
    skipped: Mutex<Vec<SkipDirection>>,
}

struct SharedLibrary(Arc<Library>);

impl Collaborators for SharedLibrary {
    fn play(&mut self, rows: Vec<Arc<Track>>, start: usize) {
        let mut played = self.0.played.lock().unwrap();
        played.extend(rows.iter().skip(start).map(|t| t.persistent_id.clone()));
    }

    fn delete(&mut self, entries: Vec<Entry>) -> BoxFuture<'static, anyhow::Result<()>> {
        let library = Arc::clone(&self.0);
        async move {
            let mut tracks = library.tracks.lock().unwrap();
            tracks.retain(|t| !entries.iter().any(|e| e.track.persistent_id == t.persistent_id));
            Ok::<(), anyhow::Error>(())
        }
        .boxed()
    }

    fn skip(&mut self, direction: SkipDirection) {
        self.0.skipped.lock().unwrap().push(direction);
    }
}

fn shared_library() -> (TrackBrowser<SharedLibrary>, Arc<Library>) {
    let library = Arc::new(Library { tracks: Mutex::new(sample_tracks()), ..Default::default() });
    let mut browser = TrackBrowser::new(SharedLibrary(Arc::clone(&library)));
    let _ = browser.set_tracks(sample_tracks());
    (browser, library)
}

#[test]
fn test_play_and_skip_through_driver() {
    let (mut browser, library) = shared_library();
    let _ = browser.apply_facet(Facet::Artist, vec!["Pink Floyd".into()]);
    let _ = browser.press(Key::Enter);
    let _ = browser.press(Key::ArrowRight);
    let _ = browser.press(Key::ArrowLeft);

    assert_eq!(*library.played.lock().unwrap(), vec!["1", "3"]);
    let skipped = library.skipped.lock().unwrap().clone();
    assert_eq!(skipped, vec![SkipDirection::Forward, SkipDirection::Back]);
}

#[test]
fn test_delete_through_driver() {
    let (mut browser, library) = shared_library();

    let _ = browser.click_row(0, Modifiers::NONE);
    let _ = browser.click_row(2, Modifiers::SHIFT);
    let _ = browser.click_row(1, Modifiers::META);

    let Dispatch::DeletePending(pending) = browser.press(Key::Delete) else {
        panic!("expected a pending delete");
    };
    assert_eq!(pending.len(), 2);
    block_on(browser.complete_delete(pending)).unwrap();

    assert_eq!(names(browser.state()), vec!["So What", "Tom Sawyer", "Blue in Green"]);
    assert!(browser.state().selected().is_empty());

    let remaining: Vec<String> =
        library.tracks.lock().unwrap().iter().map(|t| t.persistent_id.clone()).collect();
    assert_eq!(remaining, vec!["2", "4", "5"]);

    // the library pushes its new contents back
    let refreshed = library.tracks.lock().unwrap().clone();
    let _ = browser.set_tracks(refreshed);
    assert_eq!(browser.state().len(), 3);
}

#[test]
fn test_typeahead_through_driver() {
    let (mut browser, _library) = shared_library();
    let start = Instant::now();

    for (offset, ch) in ["m", "i"].iter().enumerate() {
        let input = ch.parse().unwrap();
        let now = start + Duration::from_millis(100 * offset as u64);
        assert!(browser.facet_key_press(Facet::Artist, input, now).is_handled());
    }
    assert_eq!(names(browser.state()), vec!["So What", "Blue in Green"]);
    assert_eq!(browser.state().typeahead(Facet::Artist).buffer(), "mi");
}
