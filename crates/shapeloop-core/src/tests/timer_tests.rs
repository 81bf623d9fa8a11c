use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> TimerTask) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let make = {
        let log = log.clone();
        move |label: &'static str| -> TimerTask {
            let log = log.clone();
            Box::new(move || log.borrow_mut().push(label))
        }
    };
    (log, make)
}

#[test]
fn timers_fire_in_deadline_then_arming_order() {
    let queue = TimerQueue::new();
    let (log, task) = recorder();
    queue.schedule_after(30, task("late")).unwrap();
    queue.schedule_after(10, task("first")).unwrap();
    queue.schedule_after(10, task("second")).unwrap();

    assert_eq!(queue.advance_to(30), 3);
    assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
    assert_eq!(queue.now_millis(), 30);
}

#[test]
fn advance_stops_before_future_deadlines() {
    let queue = TimerQueue::starting_at(100);
    let (log, task) = recorder();
    queue.schedule_after(50, task("a")).unwrap();

    assert_eq!(queue.advance_by(49), 0);
    assert_eq!(queue.now_millis(), 149);
    assert!(log.borrow().is_empty());
    assert_eq!(queue.next_deadline(), Some(150));

    assert_eq!(queue.advance_by(1), 1);
    assert_eq!(*log.borrow(), vec!["a"]);
    assert!(queue.is_idle());
}

#[test]
fn cancelled_timers_never_fire() {
    let queue = TimerQueue::new();
    let (log, task) = recorder();
    let doomed = queue.schedule_after(5, task("doomed")).unwrap();
    queue.schedule_after(10, task("kept")).unwrap();
    queue.cancel_timer(doomed);

    assert_eq!(queue.pending_timers(), 1);
    assert_eq!(queue.next_deadline(), Some(10));
    assert_eq!(queue.run_until_idle(), 1);
    assert_eq!(*log.borrow(), vec!["kept"]);

    // Cancelling an id that already fired is harmless.
    queue.cancel_timer(doomed);
}

#[test]
fn tasks_may_rearm_on_the_same_queue() {
    let queue = TimerQueue::new();
    let fired_at = Rc::new(RefCell::new(Vec::new()));

    fn rearm(queue: TimerQueue, fired_at: Rc<RefCell<Vec<u64>>>, remaining: u32) {
        let handle = queue.clone();
        queue
            .schedule_after(
                20,
                Box::new(move || {
                    fired_at.borrow_mut().push(handle.now_millis());
                    if remaining > 1 {
                        rearm(handle, fired_at, remaining - 1);
                    }
                }),
            )
            .unwrap();
    }

    rearm(queue.clone(), fired_at.clone(), 3);
    assert_eq!(queue.advance_to(45), 2);
    assert_eq!(*fired_at.borrow(), vec![20, 40]);
    assert_eq!(queue.now_millis(), 45);

    assert_eq!(queue.fire_next(), Some(60));
    assert_eq!(*fired_at.borrow(), vec![20, 40, 60]);
    assert_eq!(queue.fire_next(), None);
}

#[test]
fn past_deadlines_are_clamped_to_now() {
    let queue = TimerQueue::starting_at(500);
    let (log, task) = recorder();
    queue.schedule_at(100, task("overdue"));
    assert_eq!(queue.next_deadline(), Some(500));
    assert_eq!(queue.advance_by(0), 1);
    assert_eq!(*log.borrow(), vec!["overdue"]);
    assert_eq!(queue.now_millis(), 500);
}

#[test]
fn clock_reports_virtual_time() {
    let queue = TimerQueue::starting_at(7);
    let clock: &dyn Clock = &queue;
    assert_eq!(clock.now_millis(), 7);
    queue.advance_by(3);
    assert_eq!(clock.now_millis(), 10);
}
