//! Synthetic feed generation for testing and development.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::messages::*;

/// Configuration for synthetic feed generation
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Stock symbol carried by symbol-keyed messages
    pub stock: [u8; 8],
    /// Initial mid price, 4 implied decimals
    pub initial_mid: u32,
    /// Price increment between generated levels
    pub tick: u32,
    /// Largest share count for a generated order
    pub max_order_shares: u32,
    /// Probability that an event is a new order
    pub add_probability: f64,
    /// Probability that a book-touching event is an execution
    pub execute_probability: f64,
    /// Probability that an event is a hidden trade print
    pub hidden_trade_probability: f64,
    /// First event timestamp, nanoseconds since midnight
    pub start_timestamp: u64,
    /// Largest gap between consecutive events, nanoseconds
    pub max_event_gap: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            stock: *b"SYNTH   ",
            initial_mid: 1_000_000, // $100.0000
            tick: 100,              // one cent
            max_order_shares: 1_000,
            add_probability: 0.45,
            execute_probability: 0.4,
            hidden_trade_probability: 0.05,
            start_timestamp: 34_200_000_000_000, // 09:30:00
            max_event_gap: 5_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LiveOrder {
    order_ref: u64,
    buy_sell: u8,
    price: u32,
    shares: u32,
}

/// Deterministic generator of a plausible single-symbol message stream.
///
/// Emitted order-keyed messages always reference a live order, so the
/// stream replays cleanly through a processor.
pub struct SyntheticFeed {
    config: SyntheticConfig,
    rng: StdRng,
    timestamp: u64,
    next_ref: u64,
    next_match: u64,
    live: Vec<LiveOrder>,
}

impl SyntheticFeed {
    /// Create a generator with the default seed
    #[must_use]
    pub fn new(config: SyntheticConfig) -> Self {
        Self::with_seed(config, 42)
    }

    /// Create a generator with a specific seed
    #[must_use]
    pub fn with_seed(config: SyntheticConfig, seed: u64) -> Self {
        Self {
            timestamp: config.start_timestamp,
            next_ref: 1,
            next_match: 1,
            live: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    fn advance_clock(&mut self) -> u64 {
        self.timestamp += self.rng.gen_range(1..=self.config.max_event_gap);
        self.timestamp
    }

    fn random_price(&mut self) -> u32 {
        let ticks = self.rng.gen_range(0..20);
        if self.rng.gen_bool(0.5) {
            self.config.initial_mid + ticks * self.config.tick
        } else {
            self.config.initial_mid - ticks * self.config.tick
        }
    }

    fn generate_add(&mut self) -> ItchMessage {
        let timestamp = self.advance_clock();
        let order = LiveOrder {
            order_ref: self.next_ref,
            buy_sell: if self.rng.gen_bool(0.5) { b'B' } else { b'S' },
            price: self.random_price(),
            shares: self.rng.gen_range(1..=self.config.max_order_shares),
        };
        self.next_ref += 1;
        self.live.push(order);
        ItchMessage::AddOrder(AddOrder {
            stock_locate: 1,
            tracking_number: 0,
            timestamp,
            order_ref: order.order_ref,
            buy_sell: order.buy_sell,
            shares: order.shares,
            stock: self.config.stock,
            price: order.price,
        })
    }

    fn generate_hidden_trade(&mut self) -> ItchMessage {
        let timestamp = self.advance_clock();
        let match_number = self.next_match;
        self.next_match += 1;
        let price = self.random_price();
        let shares = self.rng.gen_range(1..=self.config.max_order_shares);
        ItchMessage::Trade(Trade {
            stock_locate: 1,
            tracking_number: 0,
            timestamp,
            order_ref: 0,
            buy_sell: if self.rng.gen_bool(0.5) { b'B' } else { b'S' },
            shares,
            stock: self.config.stock,
            price,
            match_number,
        })
    }

    /// Generate the next message
    pub fn next_message(&mut self) -> ItchMessage {
        if self.live.is_empty() || self.rng.gen_bool(self.config.add_probability) {
            return self.generate_add();
        }
        if self.rng.gen_bool(self.config.hidden_trade_probability) {
            return self.generate_hidden_trade();
        }

        let slot = self.rng.gen_range(0..self.live.len());
        if self.rng.gen_bool(self.config.execute_probability) {
            // Partial or full execution of a live order
            let timestamp = self.advance_clock();
            let executed = self.rng.gen_range(1..=self.live[slot].shares);
            let order_ref = self.live[slot].order_ref;
            let match_number = self.next_match;
            self.next_match += 1;
            if executed == self.live[slot].shares {
                self.live.swap_remove(slot);
            } else {
                self.live[slot].shares -= executed;
            }
            return ItchMessage::OrderExecuted(OrderExecuted {
                stock_locate: 1,
                tracking_number: 0,
                timestamp,
                order_ref,
                executed_shares: executed,
                match_number,
            });
        }

        match self.rng.gen_range(0..3) {
            0 => {
                // Partial cancel, keeping the order live
                let timestamp = self.advance_clock();
                let order = &mut self.live[slot];
                if order.shares > 1 {
                    let canceled = self.rng.gen_range(1..order.shares);
                    order.shares -= canceled;
                    ItchMessage::OrderCancel(OrderCancel {
                        stock_locate: 1,
                        tracking_number: 0,
                        timestamp,
                        order_ref: order.order_ref,
                        canceled_shares: canceled,
                    })
                } else {
                    let order_ref = order.order_ref;
                    self.live.swap_remove(slot);
                    ItchMessage::OrderDelete(OrderDelete {
                        stock_locate: 1,
                        tracking_number: 0,
                        timestamp,
                        order_ref,
                    })
                }
            }
            1 => {
                let timestamp = self.advance_clock();
                let order_ref = self.live[slot].order_ref;
                self.live.swap_remove(slot);
                ItchMessage::OrderDelete(OrderDelete {
                    stock_locate: 1,
                    tracking_number: 0,
                    timestamp,
                    order_ref,
                })
            }
            _ => {
                let timestamp = self.advance_clock();
                let new_price = self.random_price();
                let new_shares = self.rng.gen_range(1..=self.config.max_order_shares);
                let original_ref = self.live[slot].order_ref;
                let new_ref = self.next_ref;
                self.next_ref += 1;
                self.live[slot] = LiveOrder {
                    order_ref: new_ref,
                    buy_sell: self.live[slot].buy_sell,
                    price: new_price,
                    shares: new_shares,
                };
                ItchMessage::OrderReplace(OrderReplace {
                    stock_locate: 1,
                    tracking_number: 0,
                    timestamp,
                    original_ref,
                    new_ref,
                    shares: new_shares,
                    price: new_price,
                })
            }
        }
    }

    /// Generate a complete session: market-open system events, `count` book
    /// events, then market-close system events.
    pub fn session(&mut self, count: usize) -> Vec<ItchMessage> {
        let mut messages = Vec::with_capacity(count + 5);
        for code in [b'O', b'S', b'Q'] {
            let timestamp = self.advance_clock();
            messages.push(ItchMessage::SystemEvent(SystemEvent {
                stock_locate: 0,
                tracking_number: 0,
                timestamp,
                code,
            }));
        }
        for _ in 0..count {
            messages.push(self.next_message());
        }
        for code in [b'M', b'E'] {
            let timestamp = self.advance_clock();
            messages.push(ItchMessage::SystemEvent(SystemEvent {
                stock_locate: 0,
                tracking_number: 0,
                timestamp,
                code,
            }));
        }
        messages
    }

    /// References of orders still live in the generator's model
    #[must_use]
    pub fn live_refs(&self) -> Vec<u64> {
        self.live.iter().map(|o| o.order_ref).collect()
    }
}
