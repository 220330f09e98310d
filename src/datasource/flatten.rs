/// Mapping from API droplets to flat output records
use std::collections::BTreeSet;

use crate::api::Droplet;
use crate::models::DropletRecord;
use crate::tags::flatten_tags;

pub const FEATURE_BACKUPS: &str = "backups";
pub const FEATURE_IPV6: &str = "ipv6";
pub const FEATURE_PRIVATE_NETWORKING: &str = "private_networking";
pub const FEATURE_MONITORING: &str = "monitoring";

pub fn flatten_droplets(droplets: &[Droplet]) -> Vec<DropletRecord> {
    droplets.iter().map(flatten_droplet).collect()
}

pub fn flatten_droplet(droplet: &Droplet) -> DropletRecord {
    let image = match droplet.image.slug() {
        "" => droplet.image.id.to_string(),
        slug => slug.to_string(),
    };

    let features = droplet.features.as_deref();
    let flag = |name: &str| features.map(|list| contains_feature(list, name));

    DropletRecord {
        name: droplet.name.clone(),
        urn: droplet.urn(),
        region: droplet.region.slug.clone(),
        image,
        size: droplet.size.slug.clone(),
        disk: droplet.disk,
        vcpus: droplet.vcpus,
        memory: droplet.memory,
        price_hourly: droplet.size.price_hourly,
        price_monthly: droplet.size.price_monthly,
        status: droplet.status.clone(),
        locked: droplet.locked,
        ipv4_address: find_ipv4_addr_by_type(droplet, "public").map(str::to_string),
        ipv4_address_private: find_ipv4_addr_by_type(droplet, "private").map(str::to_string),
        ipv6_address: find_ipv6_addr_by_type(droplet, "public").map(str::to_lowercase),
        ipv6_address_private: find_ipv6_addr_by_type(droplet, "private").map(str::to_lowercase),
        backups: flag(FEATURE_BACKUPS),
        ipv6: flag(FEATURE_IPV6),
        private_networking: flag(FEATURE_PRIVATE_NETWORKING),
        monitoring: flag(FEATURE_MONITORING),
        volume_ids: flatten_volume_ids(&droplet.volume_ids),
        tags: flatten_tags(&droplet.tags),
    }
}

/// Address of the first v4 network of the given type ("public" or "private").
pub fn find_ipv4_addr_by_type<'a>(droplet: &'a Droplet, kind: &str) -> Option<&'a str> {
    droplet
        .networks
        .v4
        .iter()
        .find(|n| n.kind == kind)
        .map(|n| n.ip_address.as_str())
        .filter(|addr| !addr.is_empty())
}

pub fn find_ipv6_addr_by_type<'a>(droplet: &'a Droplet, kind: &str) -> Option<&'a str> {
    droplet
        .networks
        .v6
        .iter()
        .find(|n| n.kind == kind)
        .map(|n| n.ip_address.as_str())
        .filter(|addr| !addr.is_empty())
}

pub fn contains_feature(features: &[String], name: &str) -> bool {
    features.iter().any(|f| f == name)
}

pub fn flatten_volume_ids(volume_ids: &[String]) -> BTreeSet<String> {
    volume_ids.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Image, NetworkV4, NetworkV6, Networks, Region, Size};

    fn v4(ip: &str, kind: &str) -> NetworkV4 {
        NetworkV4 {
            ip_address: ip.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    fn v6(ip: &str, kind: &str) -> NetworkV6 {
        NetworkV6 {
            ip_address: ip.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    fn droplet() -> Droplet {
        Droplet {
            id: 3164444,
            name: "web-1".into(),
            memory: 1024,
            vcpus: 1,
            disk: 25,
            region: Region { slug: "nyc3".into(), name: "New York 3".into() },
            image: Image { id: 6918990, slug: Some("ubuntu-20-04-x64".into()), ..Default::default() },
            size: Size {
                slug: "s-1vcpu-1gb".into(),
                price_monthly: 5.0,
                price_hourly: 0.00744,
                ..Default::default()
            },
            size_slug: "s-1vcpu-1gb".into(),
            status: "active".into(),
            locked: false,
            features: Some(vec!["backups".into(), "ipv6".into()]),
            volume_ids: vec!["vol-b".into(), "vol-a".into(), "vol-b".into()],
            tags: vec!["web".into()],
            networks: Networks {
                v4: vec![v4("10.128.0.2", "private"), v4("104.236.32.182", "public")],
                v6: vec![v6("2604:A880:0800:0010:0000:0000:02DD:4001", "public")],
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_scalars_are_copied() {
        let record = flatten_droplet(&droplet());
        assert_eq!(record.name, "web-1");
        assert_eq!(record.urn, "do:droplet:3164444");
        assert_eq!(record.region, "nyc3");
        assert_eq!(record.size, "s-1vcpu-1gb");
        assert_eq!(record.disk, 25);
        assert_eq!(record.vcpus, 1);
        assert_eq!(record.memory, 1024);
        assert_eq!(record.price_hourly, 0.00744);
        assert_eq!(record.price_monthly, 5.0);
        assert_eq!(record.status, "active");
        assert!(!record.locked);
    }

    #[test]
    fn test_image_prefers_slug() {
        assert_eq!(flatten_droplet(&droplet()).image, "ubuntu-20-04-x64");
    }

    #[test]
    fn test_image_falls_back_to_id() {
        let mut d = droplet();
        d.image.slug = None;
        assert_eq!(flatten_droplet(&d).image, "6918990");
        d.image.slug = Some(String::new());
        assert_eq!(flatten_droplet(&d).image, "6918990");
    }

    #[test]
    fn test_addresses() {
        let record = flatten_droplet(&droplet());
        assert_eq!(record.ipv4_address.as_deref(), Some("104.236.32.182"));
        assert_eq!(record.ipv4_address_private.as_deref(), Some("10.128.0.2"));
        assert_eq!(
            record.ipv6_address.as_deref(),
            Some("2604:a880:0800:0010:0000:0000:02dd:4001")
        );
        assert_eq!(record.ipv6_address_private, None);
    }

    #[test]
    fn test_first_matching_address_wins() {
        let mut d = droplet();
        d.networks.v4.push(v4("198.51.100.7", "public"));
        assert_eq!(flatten_droplet(&d).ipv4_address.as_deref(), Some("104.236.32.182"));
    }

    #[test]
    fn test_empty_address_is_absent() {
        let mut d = droplet();
        d.networks.v4 = vec![v4("", "public")];
        assert_eq!(flatten_droplet(&d).ipv4_address, None);
    }

    #[test]
    fn test_features_present() {
        let record = flatten_droplet(&droplet());
        assert_eq!(record.backups, Some(true));
        assert_eq!(record.ipv6, Some(true));
        assert_eq!(record.private_networking, Some(false));
        assert_eq!(record.monitoring, Some(false));
    }

    #[test]
    fn test_features_absent() {
        let mut d = droplet();
        d.features = None;
        let record = flatten_droplet(&d);
        assert_eq!(record.backups, None);
        assert_eq!(record.ipv6, None);
        assert_eq!(record.private_networking, None);
        assert_eq!(record.monitoring, None);
    }

    #[test]
    fn test_empty_features_are_all_false() {
        let mut d = droplet();
        d.features = Some(vec![]);
        let record = flatten_droplet(&d);
        assert_eq!(record.backups, Some(false));
        assert_eq!(record.monitoring, Some(false));
    }

    #[test]
    fn test_volume_ids_collapse() {
        let record = flatten_droplet(&droplet());
        assert_eq!(record.volume_ids.into_iter().collect::<Vec<_>>(), vec!["vol-a", "vol-b"]);
    }
}
