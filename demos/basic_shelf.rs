use shelfkit::policy::lru::ShelfCore;
use shelfkit::traits::{BookShelf, RecencyShelf};

fn main() {
    let mut shelf = ShelfCore::try_new(2).expect("capacity is positive");

    shelf.add(1, 10);
    shelf.add(2, 20);

    if let Some(popularity) = shelf.access(1) {
        println!("hit 1: {}", popularity);
    }

    println!("victim: {:?}", shelf.peek_victim());

    shelf.add(3, 30);

    println!("contains 2? {}", shelf.contains(2));
}

// Expected output:
// hit 1: 10
// victim: Some((2, 20))
// contains 2? false
//
// Explanation: capacity=2; access(1) restamps book 1, leaving book 2 with
// the smallest stamp. Adding book 3 evicts book 2, so contains(2) is false.
