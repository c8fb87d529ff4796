use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use nihongo::config::QuizRules;
use nihongo::content::catalog::Catalog;
use nihongo::content::{Category, ContentStore};
use nihongo::engine::distractors::draw_choices;
use nihongo::engine::LessonSelector;
use nihongo::session::quiz::QuizSession;

fn bench_build_session(c: &mut Criterion) {
    let catalog = Catalog::bundled().expect("bundled content");
    let rules = QuizRules::default();
    let selector = LessonSelector::new(rules);

    for category in [Category::Hiragana, Category::Kanji] {
        let ids = selector.lesson_ids(&catalog, category, 1).expect("lesson 1");
        let items = catalog.items(category, ids);
        c.bench_function(&format!("QuizSession::new ({category}, lesson 1)"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                QuizSession::new(
                    category,
                    black_box(items.clone()),
                    false,
                    None,
                    rules,
                    SmallRng::seed_from_u64(seed),
                )
                .expect("session")
            })
        });
    }
}

fn bench_draw_choices(c: &mut Criterion) {
    let catalog = Catalog::bundled().expect("bundled content");
    let pool = catalog.all(Category::Word);
    let field = Category::Word.quizzed_fields()[0];

    c.bench_function("draw_choices (words, whole catalog)", |b| {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut current = 0;
        b.iter(|| {
            current = (current + 1) % pool.len();
            draw_choices(black_box(pool), current, field, 3, &mut rng).expect("choices")
        })
    });
}

criterion_group!(benches, bench_build_session, bench_draw_choices);
criterion_main!(benches);
