use rat_number_field::deferred::{DeferredQueue, LiveToken};

#[test]
fn test_queue_order() {
    let queue = DeferredQueue::new();
    let token = LiveToken::new();
    assert!(queue.is_empty());

    queue.push(token.schedule("a".into()));
    queue.push(token.schedule("b".into()));
    assert_eq!(queue.len(), 2);

    // clones share the queue.
    let other = queue.clone();
    assert_eq!(other.take().map(|v| v.text().to_string()), Some("a".into()));
    assert_eq!(queue.take().map(|v| v.text().to_string()), Some("b".into()));
    assert!(queue.take().is_none());
}

#[test]
fn test_generation() {
    let token = LiveToken::new();
    let t1 = token.schedule("1".into());
    assert!(t1.is_live());
    assert!(t1.is_current());
    assert!(t1.is_from(&token));

    token.bump();
    assert!(t1.is_live());
    assert!(!t1.is_current());

    let t2 = token.schedule("2".into());
    assert!(t2.is_current());
    assert_eq!(t2.generation(), t1.generation() + 1);

    let other = LiveToken::new();
    assert!(!t2.is_from(&other));
}

#[test]
fn test_dead() {
    let queue = DeferredQueue::new();
    let keep = LiveToken::new();
    let token = LiveToken::new();

    queue.push(token.schedule("gone".into()));
    queue.push(keep.schedule("keep".into()));
    drop(token);

    assert_eq!(queue.discard_dead(), 1);
    assert_eq!(queue.len(), 1);

    let t = queue.take().expect("task");
    assert!(t.is_live());
    assert_eq!(t.text(), "keep");
}
