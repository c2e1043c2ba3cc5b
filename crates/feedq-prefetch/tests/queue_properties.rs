//! Invariant checks for `ItemQueue` over generated operation sequences.
//!
//! Sequences come from a fixed-seed generator so failures reproduce. Each
//! run is checked against a plain `Vec` model of first-seen order.

use feedq_core::Item;
use feedq_prefetch::ItemQueue;
use serde_json::Value;

/// Small deterministic generator (64-bit LCG).
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> usize {
        usize::try_from(self.next_u64() % bound).unwrap()
    }
}

enum Op {
    Append(Vec<String>),
    Pop,
}

fn generate(rng: &mut Lcg, len: usize) -> Vec<Op> {
    (0..len)
        .map(|_| {
            if rng.below(3) == 0 {
                Op::Pop
            } else {
                let batch = rng.below(6);
                Op::Append((0..batch).map(|_| rng.below(12).to_string()).collect())
            }
        })
        .collect()
}

fn item(id: &str) -> Item {
    Item::new(id, format!("https://cdn.example/{id}.jpg"))
}

fn queue_ids(queue: &ItemQueue) -> Vec<String> {
    queue.iter().map(|i| i.id.to_string()).collect()
}

#[test]
fn test_dedup_and_fifo_hold_for_generated_sequences() {
    for seed in 0..200 {
        let mut rng = Lcg(seed);
        let mut queue = ItemQueue::new();
        let mut model: Vec<String> = Vec::new();
        let mut popped = Vec::new();
        let mut expected_popped = Vec::new();

        for op in generate(&mut rng, 40) {
            match op {
                Op::Append(ids) => {
                    let before = queue.len();
                    let appended = queue.append(ids.iter().map(|id| item(id)));
                    for id in ids {
                        if !model.contains(&id) {
                            model.push(id);
                        }
                    }
                    assert_eq!(queue.len(), before + appended, "seed {seed}");
                }
                Op::Pop => {
                    let before = queue.len();
                    let head = queue.pop_head();
                    if before == 0 {
                        assert!(head.is_none(), "seed {seed}");
                        assert_eq!(queue.len(), 0, "seed {seed}");
                    } else {
                        assert_eq!(queue.len(), before - 1, "seed {seed}");
                        popped.push(head.unwrap().id.to_string());
                        expected_popped.push(model.remove(0));
                    }
                }
            }

            let ids = queue_ids(&queue);
            let mut unique = ids.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), ids.len(), "duplicate id, seed {seed}");
            assert_eq!(ids, model, "order diverged, seed {seed}");
        }

        assert_eq!(popped, expected_popped, "seed {seed}");
    }
}

#[test]
fn test_snapshot_restore_reproduces_generated_queues() {
    for seed in 0..50 {
        let mut rng = Lcg(seed);
        let mut queue = ItemQueue::new();
        for op in generate(&mut rng, 20) {
            match op {
                Op::Append(ids) => {
                    queue.append(ids.iter().map(|id| item(id)));
                }
                Op::Pop => {
                    queue.pop_head();
                }
            }
        }
        if queue.is_empty() {
            continue;
        }

        let saved = serde_json::to_string(&queue.to_vec()).unwrap();
        let parsed: Value = serde_json::from_str(&saved).unwrap();

        let mut restored = ItemQueue::new();
        assert_eq!(restored.restore(&parsed), Ok(queue.len()), "seed {seed}");
        assert_eq!(restored.to_vec(), queue.to_vec(), "seed {seed}");
    }
}
