/// Sample listings for a fresh store
///
/// Seeding only happens when the item store is empty, so restarting a
/// PostgreSQL-backed server does not duplicate the samples.

use tracing::info;

use crate::models::item::CreateItem;
use crate::store::{ItemStore, StoreResult};

struct SampleListing {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    condition: &'static str,
    image: &'static str,
    location: &'static str,
    owner_id: &'static str,
    owner_name: &'static str,
}

const SAMPLES: &[SampleListing] = &[
    SampleListing {
        title: "Vintage Record Player",
        description: "Fully functional vintage record player in excellent condition. Perfect for vinyl enthusiasts.",
        category: "Electronics",
        condition: "Good",
        image: "photo-1618160702438-9b02ab6515c9",
        location: "Portland, OR",
        owner_id: "user1",
        owner_name: "Alex Johnson",
    },
    SampleListing {
        title: "Mid-Century Modern Sofa",
        description: "Beautiful 3-seater sofa in teal blue. Minimal wear and very comfortable.",
        category: "Furniture",
        condition: "Like New",
        image: "photo-1721322800607-8c38375eef04",
        location: "Seattle, WA",
        owner_id: "user2",
        owner_name: "Jamie Smith",
    },
    SampleListing {
        title: "Camping Tent (4-Person)",
        description: "Spacious 4-person tent, used twice. Includes rainfly and carry bag.",
        category: "Sports",
        condition: "Good",
        image: "photo-1472396961693-142e6e269027",
        location: "Denver, CO",
        owner_id: "user3",
        owner_name: "Morgan Lee",
    },
    SampleListing {
        title: "Mountain Bike",
        description: "Trek mountain bike, 21 speeds. Some scratches but mechanically sound.",
        category: "Sports",
        condition: "Fair",
        image: "photo-1466721591366-2d5fba72006d",
        location: "Austin, TX",
        owner_id: "user4",
        owner_name: "Jordan Wilson",
    },
    SampleListing {
        title: "Digital SLR Camera",
        description: "Canon EOS Rebel T7 with 18-55mm lens. Lightly used with all accessories.",
        category: "Electronics",
        condition: "Like New",
        image: "photo-1618160702438-9b02ab6515c9",
        location: "Chicago, IL",
        owner_id: "user5",
        owner_name: "Casey Brown",
    },
    SampleListing {
        title: "Board Game Collection",
        description: "Collection of 5 popular strategy games. All complete with all pieces.",
        category: "Toys & Games",
        condition: "Good",
        image: "photo-1472396961693-142e6e269027",
        location: "Boston, MA",
        owner_id: "user6",
        owner_name: "Taylor Green",
    },
    SampleListing {
        title: "Leather Jacket",
        description: "Men's medium brown leather jacket. Real leather, minimal wear.",
        category: "Clothing",
        condition: "Good",
        image: "photo-1466721591366-2d5fba72006d",
        location: "Los Angeles, CA",
        owner_id: "user7",
        owner_name: "Robin Parker",
    },
    SampleListing {
        title: "Gardening Tools Set",
        description: "Complete set of gardening tools including shovel, rake, and pruning shears.",
        category: "Home & Garden",
        condition: "Fair",
        image: "photo-1721322800607-8c38375eef04",
        location: "Miami, FL",
        owner_id: "user8",
        owner_name: "Sam Wilson",
    },
];

/// Creation payloads for the sample listings
pub fn sample_items() -> Vec<CreateItem> {
    SAMPLES
        .iter()
        .map(|s| CreateItem {
            title: Some(s.title.to_string()),
            description: Some(s.description.to_string()),
            category: Some(s.category.to_string()),
            condition: Some(s.condition.to_string()),
            image_url: Some(s.image.to_string()),
            location: Some(s.location.to_string()),
            owner_id: Some(s.owner_id.to_string()),
            owner_name: Some(s.owner_name.to_string()),
        })
        .collect()
}

/// Inserts the samples if `store` holds no items
///
/// Returns the number of items inserted.
pub async fn seed_if_empty(store: &dyn ItemStore) -> StoreResult<usize> {
    if !store.list().await?.is_empty() {
        return Ok(0);
    }

    let samples = sample_items();
    let count = samples.len();
    for sample in samples {
        store.create(sample).await?;
    }

    info!(count, backend = store.backend(), "Seeded sample listings");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::{Category, Condition, IMAGE_HOST_PREFIX};
    use crate::store::memory::MemoryItemStore;

    #[test]
    fn test_samples_use_known_labels() {
        for sample in sample_items() {
            assert!(sample.category.unwrap().parse::<Category>().is_ok());
            assert!(sample.condition.unwrap().parse::<Condition>().is_ok());
        }
    }

    #[tokio::test]
    async fn test_seed_if_empty_runs_once() {
        let store = MemoryItemStore::new();

        assert_eq!(seed_if_empty(&store).await.unwrap(), SAMPLES.len());
        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);

        let items = store.list().await.unwrap();
        assert_eq!(items.len(), SAMPLES.len());
        assert!(items.iter().all(|i| i.image_url.starts_with(IMAGE_HOST_PREFIX)));
    }
}
