use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use stud_rs::cards::{Card, Rank, Suit};
use stud_rs::evaluator::evaluate_five;
use stud_rs::hand::Hand;

fn bench_evaluate_five(c: &mut Criterion) {
    let hi = [
        Card::new(Rank::Ace, Suit::Hearts),
        Card::new(Rank::King, Suit::Diamonds),
        Card::new(Rank::Seven, Suit::Spades),
        Card::new(Rank::Five, Suit::Clubs),
        Card::new(Rank::Two, Suit::Diamonds),
    ];
    let royal = [
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::King, Suit::Spades),
        Card::new(Rank::Queen, Suit::Spades),
        Card::new(Rank::Jack, Suit::Spades),
        Card::new(Rank::Ten, Suit::Spades),
    ];
    let wheel = [
        Card::new(Rank::Ace, Suit::Clubs),
        Card::new(Rank::Two, Suit::Diamonds),
        Card::new(Rank::Three, Suit::Hearts),
        Card::new(Rank::Four, Suit::Spades),
        Card::new(Rank::Five, Suit::Clubs),
    ];

    let mut g = c.benchmark_group("evaluate_five");
    g.bench_with_input(BenchmarkId::new("high_card", "A,K,7,5,2"), &hi, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("royal_flush", "A-T spades"), &royal, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("straight", "wheel"), &wheel, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.finish();
}

fn bench_hand_compare(c: &mut Criterion) {
    let a: Hand = "Kh Kd 9s 9c 2h".parse().expect("valid hand");
    let b: Hand = "Kc Ks 9h 9d 3s".parse().expect("valid hand");
    c.bench_function("hand_compare_two_pair", |bench| {
        bench.iter(|| black_box(&a).compare(black_box(&b)))
    });
}

criterion_group!(benches, bench_evaluate_five, bench_hand_compare);
criterion_main!(benches);
