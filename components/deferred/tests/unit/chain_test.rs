//! Unit tests for continuation chains, including chains that pause on a
//! returned future value

use super::{calls, init_logging};
use deferred::{defer, Continuation, Continued, Recovery, SettlementStatus};

#[test]
fn plain_chain_feeds_each_return_into_the_next() {
    init_logging();
    let seen = calls::<i32>();
    let settler = defer::<i32, String>();
    let future = settler.future_value();

    let first = seen.clone();
    let second = seen.clone();
    future
        .then(move |x| {
            first.borrow_mut().push(x);
            x + 1
        })
        .then(move |x| {
            second.borrow_mut().push(x);
            x * 2
        });

    assert_eq!(settler.fulfill(3), Some(8));
    assert_eq!(*seen.borrow(), vec![3, 4]);
}

#[test]
fn chain_runs_in_attachment_order() {
    let seen = calls::<usize>();
    let settler = defer::<usize, ()>();
    let future = settler.future_value();

    for index in 0..5 {
        let log = seen.clone();
        future.then(move |x| {
            log.borrow_mut().push(index);
            x + 1
        });
    }

    assert_eq!(settler.fulfill(0), Some(5));
    assert_eq!(*seen.borrow(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn long_plain_chain_does_not_grow_the_stack() {
    let settler = defer::<u64, ()>();
    let future = settler.future_value();
    for _ in 0..100_000 {
        future.then(|x| x + 1);
    }

    assert_eq!(settler.fulfill(0), Some(100_000));
}

#[test]
fn deferred_continuation_pauses_the_chain() {
    let seen = calls::<i32>();
    let outer = defer::<i32, String>();
    let inner = defer::<i32, String>();
    let inner_future = inner.future_value();

    let log = seen.clone();
    outer
        .future_value()
        .then_deferred(move |_| inner_future)
        .then(move |x| {
            log.borrow_mut().push(x);
            x
        });

    assert_eq!(outer.fulfill(1), None);
    assert!(seen.borrow().is_empty());
    assert_eq!(inner.future_value().pending_successes(), 1);

    assert_eq!(inner.fulfill(5), Some(5));
    assert_eq!(*seen.borrow(), vec![5]);
}

#[test]
fn resettling_outer_does_not_advance_a_paused_chain() {
    let seen = calls::<i32>();
    let outer = defer::<i32, String>();
    let inner = defer::<i32, String>();
    let inner_future = inner.future_value();

    let log = seen.clone();
    let failures = calls::<String>();
    let failure_log = failures.clone();
    outer
        .future_value()
        .then_deferred(move |_| inner_future)
        .on_settled(
            Some(Continuation::map(move |x| {
                log.borrow_mut().push(x);
                x
            })),
            Some(Recovery::inspect(move |e: &String| {
                failure_log.borrow_mut().push(e.clone())
            })),
        );

    outer.fulfill(1);
    outer.fulfill(2);
    outer.fail("outer".to_string());

    assert!(seen.borrow().is_empty());
    assert!(failures.borrow().is_empty());
    assert_eq!(outer.future_value().pending_successes(), 0);
    assert_eq!(outer.future_value().pending_failures(), 0);

    inner.fulfill(9);
    assert_eq!(*seen.borrow(), vec![9]);
}

#[test]
fn paused_chain_carries_failure_continuations_to_inner() {
    let failures = calls::<String>();
    let outer = defer::<i32, String>();
    let inner = defer::<i32, String>();
    let inner_future = inner.future_value();

    let log = failures.clone();
    let future = outer.future_value();
    future.then_deferred(move |_| inner_future);
    future.on_failure_only(Recovery::inspect(move |e: &String| {
        log.borrow_mut().push(e.clone())
    }));

    outer.fulfill(0);
    inner.fail("timeout".to_string());

    assert_eq!(*failures.borrow(), vec!["timeout".to_string()]);
    assert_eq!(inner.future_value().status(), SettlementStatus::Rejected);
}

#[test]
fn transplanted_continuations_run_after_inner_ones() {
    let seen = calls::<&'static str>();
    let outer = defer::<i32, String>();
    let inner = defer::<i32, String>();

    let inner_log = seen.clone();
    inner.future_value().then(move |x| {
        inner_log.borrow_mut().push("inner");
        x + 1
    });

    let inner_future = inner.future_value();
    let outer_log = seen.clone();
    outer
        .future_value()
        .then_deferred(move |_| inner_future)
        .then(move |x| {
            outer_log.borrow_mut().push("outer");
            x * 100
        });

    outer.fulfill(0);
    assert_eq!(inner.fulfill(1), Some(200));
    assert_eq!(*seen.borrow(), vec!["inner", "outer"]);
}

#[test]
fn continuation_may_return_an_already_settled_future_value() {
    let seen = calls::<i32>();
    let outer = defer::<i32, String>();
    let inner = defer::<i32, String>();
    inner.fulfill(7);
    let inner_future = inner.future_value();

    let log = seen.clone();
    outer
        .future_value()
        .then_deferred(move |_| inner_future)
        .then(move |x| {
            log.borrow_mut().push(x);
            x
        });

    // The pause is structural: nothing runs until the inner settler is
    // driven again, and then it uses its own recorded value.
    outer.fulfill(1);
    assert!(seen.borrow().is_empty());

    assert_eq!(inner.fulfill(0), Some(7));
    assert_eq!(*seen.borrow(), vec![7]);
}

#[test]
fn continuation_returning_its_own_future_value_keeps_the_rest_queued() {
    let settler = defer::<i32, String>();
    let future = settler.future_value();
    let same = future.clone();

    future.then_deferred(move |_| same).then(|x| x + 1);

    assert_eq!(settler.fulfill(1), None);
    assert_eq!(future.pending_successes(), 1);
    assert_eq!(settler.fulfill(1), Some(2));
}

#[test]
fn nested_pauses_resume_in_sequence() {
    let first = defer::<i32, String>();
    let second = defer::<i32, String>();
    let third = defer::<i32, String>();
    let second_future = second.future_value();
    let third_future = third.future_value();

    first
        .future_value()
        .then_deferred(move |_| second_future)
        .then(|x| x + 1)
        .then_deferred(move |_| third_future)
        .then(|x| x * 3);

    assert_eq!(first.fulfill(0), None);
    assert_eq!(second.fulfill(10), None);
    assert_eq!(third.future_value().pending_successes(), 1);
    assert_eq!(third.fulfill(4), Some(12));
}

#[test]
fn continuation_may_settle_another_settler() {
    let downstream = std::rc::Rc::new(defer::<i32, String>());
    let seen = calls::<i32>();
    let log = seen.clone();
    downstream.future_value().then(move |x| {
        log.borrow_mut().push(x);
        x
    });

    let upstream = defer::<i32, String>();
    let target = downstream.clone();
    upstream.future_value().then(move |x| {
        target.fulfill(x * 2);
        x
    });

    assert_eq!(upstream.fulfill(21), Some(21));
    assert_eq!(*seen.borrow(), vec![42]);
}

#[test]
fn explicit_continued_value_behaves_like_map() {
    let settler = defer::<i32, String>();
    settler
        .future_value()
        .on_settled(Some(Continuation::new(|x| Continued::Value(x - 1))), None);

    assert_eq!(settler.fulfill(10), Some(9));
}

#[test]
#[should_panic(expected = "continuation failed")]
fn panicking_continuation_propagates_to_fulfill_caller() {
    let settler = defer::<i32, String>();
    settler
        .future_value()
        .then(|_| panic!("continuation failed"));
    settler.fulfill(1);
}

#[test]
#[should_panic(expected = "recovery failed")]
fn panicking_recovery_propagates_to_fail_caller() {
    let settler = defer::<i32, String>();
    settler
        .future_value()
        .on_failure_only(Recovery::new(|_| panic!("recovery failed")));
    settler.fail("x".to_string());
}
